mod test_support;

use std::collections::HashMap;

use serde_json::json;
use sgc_core::servicio::transiciones::*;
use sgc_core::*;
use sgc_domain::*;
use test_support::{repos, sufijo};

macro_rules! repos_o_salir {
    () => {
        match repos() {
            Some(r) => r,
            None => {
                eprintln!("skip (no DATABASE_URL)");
                return;
            }
        }
    };
}

fn usuario(repos: &Repositorios) -> Usuario {
    let nombre_usuario = format!("u-{}", sufijo());
    NuevoUsuario { nombre: Some("Ana".into()),
                   email: Some(format!("{nombre_usuario}@example.com")),
                   nombre_usuario: Some(nombre_usuario),
                   ..Default::default() }.dar_de_alta(repos)
                                         .unwrap()
}

#[test]
fn pg_crud_de_area() {
    let repos = repos_o_salir!();
    let codigo = format!("A-{}", sufijo());
    let a = NuevaArea { codigo: Some(codigo.clone()),
                        nombre: Some("Calidad".into()),
                        ..Default::default() }.dar_de_alta(&repos)
                                              .unwrap();
    assert_eq!(obtener::<Area>(&repos, a.id).unwrap(), a);

    let dup = NuevaArea { codigo: Some(codigo),
                          nombre: Some("Otra".into()),
                          ..Default::default() }.dar_de_alta(&repos);
    assert!(matches!(dup, Err(CoreError::Conflicto(_))));

    let cambiada = CambiosArea { nombre: Some("Gestión de calidad".into()),
                                 ..Default::default() }.modificar(a.id, &repos)
                                                       .unwrap();
    assert_eq!(cambiada.nombre, "Gestión de calidad");
    assert!(cambiada.actualizado_en.is_some());

    let borrada = eliminar::<Area>(&repos, a.id).unwrap();
    assert_eq!(borrada.id, a.id);
    assert!(matches!(obtener::<Area>(&repos, a.id), Err(CoreError::NoEncontrado(_))));
}

#[test]
fn pg_instancia_avanza_y_registra_accion() {
    let repos = repos_o_salir!();
    let u = usuario(&repos);
    let p = NuevoProceso { codigo: Some(format!("P-{}", sufijo())),
                           nombre: Some("Compras".into()),
                           ..Default::default() }.dar_de_alta(&repos)
                                                 .unwrap();
    let e1 = NuevaEtapaProceso { proceso_id: Some(p.id),
                                 nombre: Some("Solicitud".into()),
                                 ..Default::default() }.dar_de_alta(&repos)
                                                       .unwrap();
    let e2 = NuevaEtapaProceso { proceso_id: Some(p.id),
                                 nombre: Some("Aprobación".into()),
                                 ..Default::default() }.dar_de_alta(&repos)
                                                       .unwrap();
    assert_eq!((e1.orden, e2.orden), (1, 2));

    let i = NuevaInstanciaProceso { proceso_id: Some(p.id),
                                    ..Default::default() }.dar_de_alta(&repos)
                                                          .unwrap();
    let i = iniciar_instancia(&repos, i.id, InicioInstancia { usuario_id: Some(u.id) }).unwrap();
    assert_eq!(i.estado, EstadoInstancia::EnProgreso);
    assert_eq!(i.etapa_actual_id, Some(e1.id));

    let avance = AvanceInstancia { etapa_id: Some(e2.id),
                                   usuario_id: Some(u.id),
                                   datos: Some(DatosJson::try_from(json!({"monto": 1500})).unwrap()),
                                   ..Default::default() };
    let r = avanzar_instancia(&repos, i.id, avance).unwrap();
    assert_eq!(r.instancia.etapa_actual_id, Some(e2.id));
    assert_eq!(r.instancia.datos.get("monto"), Some(&json!(1500)));

    let params = HashMap::from([("instanciaId".to_string(), i.id.to_string())]);
    let acciones = listar::<AccionProceso>(&repos, &params).unwrap();
    assert_eq!(acciones.len(), 1);
    assert_eq!(acciones[0].tipo_accion, ACCION_AVANCE);

    eliminar::<Proceso>(&repos, p.id).unwrap();
    assert!(matches!(obtener::<InstanciaProceso>(&repos, i.id), Err(CoreError::NoEncontrado(_))));
}

#[test]
fn pg_filtros_y_orden_descendente() {
    let repos = repos_o_salir!();
    let u = usuario(&repos);
    for tipo in ["primero", "segundo"] {
        NuevaNotificacion { usuario_id: Some(u.id),
                            tipo: Some(tipo.into()),
                            ..Default::default() }.dar_de_alta(&repos)
                                                  .unwrap();
    }
    let params = HashMap::from([("usuarioId".to_string(), u.id.to_string()),
                                ("entregada".to_string(), "false".to_string())]);
    let lista = listar::<Notificacion>(&repos, &params).unwrap();
    assert_eq!(lista.iter().map(|n| n.tipo.as_str()).collect::<Vec<_>>(), vec!["segundo", "primero"]);

    let entregada = marcar_entregada(&repos, lista[0].id).unwrap();
    assert!(entregada.entregada_en.is_some());
    assert_eq!(listar::<Notificacion>(&repos, &params).unwrap().len(), 1);

    eliminar::<Usuario>(&repos, u.id).unwrap();
}

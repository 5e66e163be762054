use std::collections::HashMap;

use sgc_core::servicio::transiciones::*;
use sgc_core::*;
use sgc_domain::*;
use uuid::Uuid;

fn usuario(repos: &Repositorios, nombre_usuario: &str) -> Usuario {
    NuevoUsuario { nombre: Some("Ana".into()),
                   nombre_usuario: Some(nombre_usuario.into()),
                   email: Some(format!("{nombre_usuario}@example.com")),
                   ..Default::default() }.dar_de_alta(repos)
                                         .unwrap()
}

fn area(repos: &Repositorios, codigo: &str) -> Area {
    NuevaArea { codigo: Some(codigo.into()),
                nombre: Some("Calidad".into()),
                ..Default::default() }.dar_de_alta(repos)
                                      .unwrap()
}

fn proceso(repos: &Repositorios, codigo: &str) -> Proceso {
    NuevoProceso { codigo: Some(codigo.into()),
                   nombre: Some("Compras".into()),
                   ..Default::default() }.dar_de_alta(repos)
                                         .unwrap()
}

fn etapa(repos: &Repositorios, proceso_id: Uuid, nombre: &str) -> EtapaProceso {
    NuevaEtapaProceso { proceso_id: Some(proceso_id),
                        nombre: Some(nombre.into()),
                        ..Default::default() }.dar_de_alta(repos)
                                              .unwrap()
}

fn instancia(repos: &Repositorios, proceso_id: Uuid) -> InstanciaProceso {
    NuevaInstanciaProceso { proceso_id: Some(proceso_id),
                            ..Default::default() }.dar_de_alta(repos)
                                                  .unwrap()
}

fn total<E: Entidad>(repos: &Repositorios) -> usize
    where Repositorios: RepositorioDe<E>
{
    listar::<E>(repos, &HashMap::new()).unwrap().len()
}

#[test]
fn test_proceso_codigo_duplicado_es_conflicto() {
    let repos = Repositorios::en_memoria();
    let original = proceso(&repos, "P-01");
    let r = NuevoProceso { codigo: Some("P-01".into()),
                           nombre: Some("Otro".into()),
                           ..Default::default() }.dar_de_alta(&repos);
    assert!(matches!(r, Err(CoreError::Conflicto(_))));
    assert_eq!(total::<Proceso>(&repos), 1);
    assert_eq!(obtener::<Proceso>(&repos, original.id).unwrap(), original);
}

#[test]
fn test_proceso_renombrar_a_codigo_usado() {
    let repos = Repositorios::en_memoria();
    proceso(&repos, "P-01");
    let segundo = proceso(&repos, "P-02");
    let r = CambiosProceso { codigo: Some("P-01".into()),
                             ..Default::default() }.modificar(segundo.id, &repos);
    assert!(matches!(r, Err(CoreError::Conflicto(_))));
    assert_eq!(obtener::<Proceso>(&repos, segundo.id).unwrap().codigo, "P-02");

    let mismo = CambiosProceso { codigo: Some("P-02".into()),
                                 nombre: Some("Compras nacionales".into()),
                                 ..Default::default() }.modificar(segundo.id, &repos)
                                                       .unwrap();
    assert_eq!(mismo.nombre, "Compras nacionales");
    assert!(mismo.actualizado_en.is_some());
}

#[test]
fn test_asignacion_duplicada() {
    let repos = Repositorios::en_memoria();
    let u = usuario(&repos, "ana");
    let a = area(&repos, "CAL");
    let nueva = || NuevaAsignacion { area_id: Some(a.id),
                                     usuario_id: Some(u.id),
                                     es_principal: Some(true) };
    nueva().dar_de_alta(&repos).unwrap();
    assert!(matches!(nueva().dar_de_alta(&repos), Err(CoreError::Conflicto(_))));
    assert_eq!(total::<Asignacion>(&repos), 1);
}

#[test]
fn test_asignacion_referencias_inexistentes() {
    let repos = Repositorios::en_memoria();
    let u = usuario(&repos, "ana");
    let r = NuevaAsignacion { area_id: Some(Uuid::new_v4()),
                              usuario_id: Some(u.id),
                              es_principal: None }.dar_de_alta(&repos);
    assert!(matches!(r, Err(CoreError::Validacion(_))));
}

#[test]
fn test_usuario_nombre_usuario_unico() {
    let repos = Repositorios::en_memoria();
    usuario(&repos, "ana");
    let otro = usuario(&repos, "beto");
    let r = NuevoUsuario { nombre: Some("Ana 2".into()),
                           nombre_usuario: Some("ana".into()),
                           email: Some("ana2@example.com".into()),
                           ..Default::default() }.dar_de_alta(&repos);
    assert!(matches!(r, Err(CoreError::Conflicto(_))));
    let r = CambiosUsuario { nombre_usuario: Some("ana".into()),
                             ..Default::default() }.modificar(otro.id, &repos);
    assert!(matches!(r, Err(CoreError::Conflicto(_))));
}

#[test]
fn test_campo_requerido_no_persiste() {
    let repos = Repositorios::en_memoria();
    let r = NuevaNoConformidad { descripcion: Some("sin código".into()),
                                 ..Default::default() }.dar_de_alta(&repos);
    assert!(matches!(r, Err(CoreError::Validacion(_))));
    assert_eq!(total::<NoConformidad>(&repos), 0);
}

#[test]
fn test_modificar_inexistente_es_no_encontrado() {
    let repos = Repositorios::en_memoria();
    let r = CambiosArea { nombre: Some("x".into()),
                          ..Default::default() }.modificar(Uuid::new_v4(), &repos);
    assert!(matches!(r, Err(CoreError::NoEncontrado(_))));
    assert_eq!(total::<Area>(&repos), 0);
    assert!(matches!(eliminar::<Area>(&repos, Uuid::new_v4()), Err(CoreError::NoEncontrado(_))));
}

#[test]
fn test_no_conformidad_ciclo_de_vida() {
    let repos = Repositorios::en_memoria();
    let nc = NuevaNoConformidad { codigo: Some("NC-001".into()),
                                  descripcion: Some("Lote rechazado".into()),
                                  ..Default::default() }.dar_de_alta(&repos)
                                                        .unwrap();
    assert_eq!(nc.estado, EstadoNoConformidad::Abierta);

    let nc = iniciar_tratamiento(&repos, nc.id, Observacion::default()).unwrap();
    assert_eq!(nc.estado, EstadoNoConformidad::EnTratamiento);

    let nc = cerrar_no_conformidad(&repos, nc.id, Observacion { observaciones: Some("resuelto".into()) }).unwrap();
    assert_eq!(nc.estado, EstadoNoConformidad::Cerrada);
    assert_eq!(nc.observaciones.as_deref(), Some("resuelto"));
    assert!(nc.fecha_cierre.is_some());
    assert_eq!(obtener::<NoConformidad>(&repos, nc.id).unwrap(), nc);
}

#[test]
fn test_accion_correctiva_requiere_no_conformidad() {
    let repos = Repositorios::en_memoria();
    let r = NuevaAccionCorrectiva { no_conformidad_id: Some(Uuid::new_v4()),
                                    descripcion: Some("Recapacitar".into()),
                                    ..Default::default() }.dar_de_alta(&repos);
    assert!(matches!(r, Err(CoreError::Validacion(_))));
}

#[test]
fn test_accion_correctiva_transiciones() {
    let repos = Repositorios::en_memoria();
    let nc = NuevaNoConformidad { codigo: Some("NC-9".into()),
                                  descripcion: Some("x".into()),
                                  ..Default::default() }.dar_de_alta(&repos)
                                                        .unwrap();
    let ac = NuevaAccionCorrectiva { no_conformidad_id: Some(nc.id),
                                     descripcion: Some("Recapacitar".into()),
                                     ..Default::default() }.dar_de_alta(&repos)
                                                           .unwrap();
    let ac = iniciar_accion_correctiva(&repos, ac.id, Observacion::default()).unwrap();
    assert_eq!(ac.estado, EstadoAccionCorrectiva::EnProceso);
    let ac = completar_accion_correctiva(&repos, ac.id, Observacion::default()).unwrap();
    assert!(ac.fecha_completado.is_some());
    let ac = verificar_accion_correctiva(&repos, ac.id, Observacion { observaciones: Some("eficaz".into()) }).unwrap();
    assert_eq!(ac.estado, EstadoAccionCorrectiva::Verificada);
    assert_eq!(ac.observaciones.as_deref(), Some("eficaz"));
}

#[test]
fn test_etapas_orden_por_defecto() {
    let repos = Repositorios::en_memoria();
    let p = proceso(&repos, "P-01");
    let e1 = etapa(&repos, p.id, "Solicitud");
    let e2 = etapa(&repos, p.id, "Aprobación");
    assert_eq!((e1.orden, e2.orden), (1, 2));

    let e3 = etapa(&repos, p.id, "Pago");
    eliminar::<EtapaProceso>(&repos, e2.id).unwrap();
    let e4 = etapa(&repos, p.id, "Archivo");
    assert_eq!((e3.orden, e4.orden), (3, 4));

    let r = NuevaEtapaProceso { proceso_id: Some(Uuid::new_v4()),
                                nombre: Some("x".into()),
                                ..Default::default() }.dar_de_alta(&repos);
    assert!(matches!(r, Err(CoreError::Validacion(_))));
}

#[test]
fn test_instancia_etapa_de_otro_proceso() {
    let repos = Repositorios::en_memoria();
    let p1 = proceso(&repos, "P-01");
    let p2 = proceso(&repos, "P-02");
    let ajena = etapa(&repos, p2.id, "Ajena");
    let r = NuevaInstanciaProceso { proceso_id: Some(p1.id),
                                    etapa_actual_id: Some(ajena.id),
                                    ..Default::default() }.dar_de_alta(&repos);
    assert!(matches!(r, Err(CoreError::Validacion(_))));

    let i = instancia(&repos, p1.id);
    let r = CambiosInstanciaProceso { etapa_actual_id: Some(Some(ajena.id)),
                                      ..Default::default() }.modificar(i.id, &repos);
    assert!(matches!(r, Err(CoreError::Validacion(_))));
}

#[test]
fn test_instancia_iniciar_y_avanzar() {
    let repos = Repositorios::en_memoria();
    let u = usuario(&repos, "ana");
    let p = proceso(&repos, "P-01");
    let e1 = etapa(&repos, p.id, "Solicitud");
    let e2 = etapa(&repos, p.id, "Aprobación");
    let i = instancia(&repos, p.id);

    let i = iniciar_instancia(&repos, i.id, InicioInstancia { usuario_id: Some(u.id) }).unwrap();
    assert_eq!(i.estado, EstadoInstancia::EnProgreso);
    assert_eq!(i.etapa_actual_id, Some(e1.id));

    let avance = AvanceInstancia { etapa_id: Some(e2.id),
                                   usuario_id: Some(u.id),
                                   comentario: Some("aprobado".into()),
                                   ..Default::default() };
    let r = avanzar_instancia(&repos, i.id, avance).unwrap();
    assert_eq!(r.instancia.etapa_actual_id, Some(e2.id));
    assert_eq!(r.accion.etapa_id, e2.id);

    let filtro: HashMap<String, String> = [("instanciaId".to_string(), i.id.to_string())].into();
    let acciones = listar::<AccionProceso>(&repos, &filtro).unwrap();
    assert_eq!(acciones.len(), 1);
    assert_eq!(acciones[0].comentario.as_deref(), Some("aprobado"));

    let i = completar_instancia(&repos, i.id).unwrap();
    assert_eq!(i.estado, EstadoInstancia::Completada);
}

#[test]
fn test_avanzar_rechazos() {
    let repos = Repositorios::en_memoria();
    let u = usuario(&repos, "ana");
    let p = proceso(&repos, "P-01");
    let otro = proceso(&repos, "P-02");
    let e1 = etapa(&repos, p.id, "Solicitud");
    let ajena = etapa(&repos, otro.id, "Ajena");
    let i = instancia(&repos, p.id);

    let a_etapa = |etapa_id| AvanceInstancia { etapa_id: Some(etapa_id),
                                               usuario_id: Some(u.id),
                                               ..Default::default() };

    assert!(matches!(avanzar_instancia(&repos, i.id, a_etapa(ajena.id)), Err(CoreError::Validacion(_))));

    bloquear_instancia(&repos, i.id, BloqueoInstancia { motivo: Some("auditoría".into()) }).unwrap();
    assert!(matches!(avanzar_instancia(&repos, i.id, a_etapa(e1.id)), Err(CoreError::Conflicto(_))));
    assert_eq!(total::<AccionProceso>(&repos), 0);

    let i = desbloquear_instancia(&repos, i.id).unwrap();
    assert!(!i.bloqueado);
    avanzar_instancia(&repos, i.id, a_etapa(e1.id)).unwrap();
    assert_eq!(total::<AccionProceso>(&repos), 1);

    assert!(matches!(avanzar_instancia(&repos, Uuid::new_v4(), a_etapa(e1.id)), Err(CoreError::NoEncontrado(_))));
    let cancelada = cancelar_instancia(&repos, i.id).unwrap();
    assert_eq!(cancelada.estado, EstadoInstancia::Cancelada);
}

#[test]
fn test_asistencia_unica_y_cambios() {
    let repos = Repositorios::en_memoria();
    let u = usuario(&repos, "ana");
    let c = NuevaCapacitacion { nombre: Some("ISO 9001".into()),
                                fecha_inicio: chrono::NaiveDate::from_ymd_opt(2024, 3, 1),
                                ..Default::default() }.dar_de_alta(&repos)
                                                      .unwrap();
    let nueva = || NuevaAsistencia { capacitacion_id: Some(c.id),
                                     usuario_id: Some(u.id),
                                     ..Default::default() };
    let a = nueva().dar_de_alta(&repos).unwrap();
    assert!(matches!(nueva().dar_de_alta(&repos), Err(CoreError::Conflicto(_))));

    let a2 = CambiosAsistencia { asistio: Some(true),
                                 ..Default::default() }.modificar(a.id, &repos)
                                                       .unwrap();
    assert!(a2.asistio);
    assert_eq!((a2.capacitacion_id, a2.usuario_id), (c.id, u.id));
}

#[test]
fn test_listar_filtros() {
    let repos = Repositorios::en_memoria();
    let a1 = area(&repos, "A1");
    let a2 = area(&repos, "A2");
    for (codigo, area_id) in [("P-1", a1.id), ("P-2", a1.id), ("P-3", a2.id)] {
        NuevoProceso { codigo: Some(codigo.into()),
                       nombre: Some(codigo.into()),
                       area_id: Some(area_id),
                       ..Default::default() }.dar_de_alta(&repos)
                                             .unwrap();
    }
    let filtro: HashMap<String, String> = [("areaId".to_string(), a1.id.to_string())].into();
    assert_eq!(listar::<Proceso>(&repos, &filtro).unwrap().len(), 2);

    let malo: HashMap<String, String> = [("areaId".to_string(), "no-uuid".to_string())].into();
    assert!(matches!(listar::<Proceso>(&repos, &malo), Err(CoreError::Validacion(_))));
}

#[test]
fn test_filtro_de_estado_fuera_de_catalogo() {
    let repos = Repositorios::en_memoria();
    NuevaNoConformidad { codigo: Some("NC-1".into()),
                         descripcion: Some("x".into()),
                         ..Default::default() }.dar_de_alta(&repos)
                                               .unwrap();
    let abierta: HashMap<String, String> = [("estado".to_string(), "abierta".to_string())].into();
    assert_eq!(listar::<NoConformidad>(&repos, &abierta).unwrap().len(), 1);

    let malo: HashMap<String, String> = [("estado".to_string(), "bogus".to_string())].into();
    assert!(matches!(listar::<NoConformidad>(&repos, &malo), Err(CoreError::Validacion(_))));
    let malo: HashMap<String, String> = [("visibilidad".to_string(), "secreta".to_string())].into();
    assert!(matches!(listar::<Documento>(&repos, &malo), Err(CoreError::Validacion(_))));
}

#[test]
fn test_notificacion_entregada() {
    let repos = Repositorios::en_memoria();
    let u = usuario(&repos, "ana");
    let n = NuevaNotificacion { usuario_id: Some(u.id),
                                tipo: Some("recordatorio".into()),
                                ..Default::default() }.dar_de_alta(&repos)
                                                      .unwrap();
    let n = marcar_entregada(&repos, n.id).unwrap();
    assert!(n.entregada);
    let filtro: HashMap<String, String> = [("entregada".to_string(), "true".to_string())].into();
    assert_eq!(listar::<Notificacion>(&repos, &filtro).unwrap().len(), 1);
}

#[test]
fn test_eliminar_devuelve_registro() {
    let repos = Repositorios::en_memoria();
    let r = NuevoRiesgo { codigo: Some("R-1".into()),
                          descripcion: Some("Proveedor único".into()),
                          ..Default::default() }.dar_de_alta(&repos)
                                                .unwrap();
    let borrado = eliminar::<Riesgo>(&repos, r.id).unwrap();
    assert_eq!(borrado.id, r.id);
    assert!(matches!(obtener::<Riesgo>(&repos, r.id), Err(CoreError::NoEncontrado(_))));
}

#[test]
fn test_registrar_archivo_devuelve_ruta_anterior() {
    let repos = Repositorios::en_memoria();
    let d = NuevoDocumento { titulo: Some("Manual de calidad".into()),
                             ..Default::default() }.dar_de_alta(&repos)
                                                   .unwrap();
    let archivo = |ruta: &str| ArchivoSubido { ruta: ruta.into(),
                                               url: format!("https://s/{ruta}"),
                                               tipo_mime: Some("application/pdf".into()),
                                               tamano_bytes: 4 };
    let (d1, anterior) = registrar_archivo(&repos, d.id, archivo("v1.pdf")).unwrap();
    assert_eq!(anterior, None);
    assert_eq!(d1.ruta_almacenamiento.as_deref(), Some("v1.pdf"));
    let (d2, anterior) = registrar_archivo(&repos, d.id, archivo("v2.pdf")).unwrap();
    assert_eq!(anterior.as_deref(), Some("v1.pdf"));
    assert_eq!(d2.url.as_deref(), Some("https://s/v2.pdf"));

    let r = registrar_archivo(&repos, Uuid::new_v4(), archivo("x.pdf"));
    assert!(matches!(r, Err(CoreError::NoEncontrado(_))));
}

#[test]
fn test_asignar_foto() {
    let repos = Repositorios::en_memoria();
    let u = usuario(&repos, "luis");
    let u = asignar_foto(&repos, u.id, "https://s/imagenes/luis.png".into()).unwrap();
    assert_eq!(u.foto_url.as_deref(), Some("https://s/imagenes/luis.png"));
    assert!(u.actualizado_en.is_some());
}

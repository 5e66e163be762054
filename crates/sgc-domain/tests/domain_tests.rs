use sgc_domain::*;
use serde_json::json;
use uuid::Uuid;

#[test]
fn test_usuario_payload_camel_case_roundtrip() {
    let nuevo: NuevoUsuario = serde_json::from_value(json!({
        "nombre": "Ana",
        "apellidoPaterno": "Pérez",
        "nombreUsuario": "aperez",
        "email": "ana@example.com"
    })).unwrap();
    let u = nuevo.validar().unwrap();
    assert!(u.activo);
    assert_eq!(u.nombre_completo(), "Ana Pérez");

    let v = serde_json::to_value(&u).unwrap();
    assert_eq!(v["nombreUsuario"], "aperez");
    assert_eq!(v["apellidoPaterno"], "Pérez");
    assert!(v.get("nombre_usuario").is_none());
}

#[test]
fn test_usuario_missing_required_fields() {
    let err = NuevoUsuario { nombre: Some("Ana".into()),
                             email: Some("ana@example.com".into()),
                             ..Default::default() }.validar()
                                                   .unwrap_err();
    assert_eq!(err, DomainError::CampoRequerido("nombreUsuario".into()));

    let err = NuevoUsuario { nombre: Some("Ana".into()),
                             nombre_usuario: Some("ana".into()),
                             email: Some("sin-arroba".into()),
                             ..Default::default() }.validar()
                                                   .unwrap_err();
    assert!(matches!(err, DomainError::Validacion(_)));
}

#[test]
fn test_proceso_defaults_and_rename_detection() {
    let p = NuevoProceso { codigo: Some("P-01".into()),
                           nombre: Some("Compras".into()),
                           ..Default::default() }.validar()
                                                 .unwrap();
    assert_eq!(p.estado, EstadoProceso::Activo);
    assert_eq!(p.version, "1.0");

    let mismo = CambiosProceso { codigo: Some("P-01".into()),
                                 ..Default::default() };
    assert_eq!(mismo.nuevo_codigo(&p), None);
    let otro = CambiosProceso { codigo: Some("P-02".into()),
                                ..Default::default() };
    assert_eq!(otro.nuevo_codigo(&p), Some("P-02"));
}

#[test]
fn test_cambios_vacios_rechazados() {
    let mut p = NuevoProceso { codigo: Some("P-01".into()),
                               nombre: Some("Compras".into()),
                               ..Default::default() }.validar()
                                                     .unwrap();
    let err = CambiosProceso { nombre: Some("  ".into()),
                               ..Default::default() }.aplicar(&mut p)
                                                     .unwrap_err();
    assert_eq!(err, DomainError::CampoRequerido("nombre".into()));
    assert_eq!(p.nombre, "Compras");
}

#[test]
fn test_instancia_lifecycle() {
    let mut i = NuevaInstanciaProceso { proceso_id: Some(Uuid::new_v4()),
                                        ..Default::default() }.validar()
                                                              .unwrap();
    assert_eq!(i.estado, EstadoInstancia::Borrador);
    assert!(i.datos.is_empty());
    assert!(i.fecha_inicio.is_none());

    let etapa = Uuid::new_v4();
    let usuario = Uuid::new_v4();
    i.iniciar(Some(usuario), Some(etapa));
    assert_eq!(i.estado, EstadoInstancia::EnProgreso);
    assert_eq!(i.etapa_actual_id, Some(etapa));
    assert_eq!(i.iniciado_por, Some(usuario));
    assert!(i.fecha_inicio.is_some());

    i.bloquear(Some("falta firma".into()));
    let err = i.avanzar_a(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, DomainError::NoPermitido(_)));
    assert_eq!(i.etapa_actual_id, Some(etapa));

    i.desbloquear();
    assert!(i.motivo_bloqueo.is_none());
    let siguiente = Uuid::new_v4();
    i.avanzar_a(siguiente).unwrap();
    assert_eq!(i.etapa_actual_id, Some(siguiente));

    i.completar();
    assert_eq!(i.estado, EstadoInstancia::Completada);
    assert!(i.fecha_completado.is_some());
}

#[test]
fn test_instancia_rechaza_datos_no_objeto() {
    let r = serde_json::from_value::<NuevaInstanciaProceso>(json!({
        "procesoId": Uuid::new_v4(),
        "datos": [1, 2, 3]
    }));
    assert!(r.is_err());
}

#[test]
fn test_avance_builds_accion() {
    let instancia = Uuid::new_v4();
    let avance = AvanceInstancia { etapa_id: Some(Uuid::new_v4()),
                                   usuario_id: Some(Uuid::new_v4()),
                                   comentario: Some("ok".into()),
                                   tiempo_respuesta_segundos: Some(30),
                                   ..Default::default() };
    let accion = avance.accion(instancia).unwrap();
    assert_eq!(accion.instancia_id, instancia);
    assert_eq!(accion.tipo_accion, "avance");
    assert_eq!(accion.tiempo_respuesta_segundos, Some(30));

    let sin_usuario = AvanceInstancia { etapa_id: Some(Uuid::new_v4()),
                                        ..Default::default() };
    assert_eq!(sin_usuario.accion(instancia).unwrap_err(),
               DomainError::CampoRequerido("usuarioId".into()));
}

#[test]
fn test_no_conformidad_lifecycle() {
    let mut nc = NuevaNoConformidad { codigo: Some("NC-001".into()),
                                      descripcion: Some("Producto fuera de especificación".into()),
                                      ..Default::default() }.validar()
                                                            .unwrap();
    assert_eq!(nc.estado, EstadoNoConformidad::Abierta);
    assert_eq!(nc.gravedad, Gravedad::Media);

    nc.iniciar_tratamiento(Observacion::default());
    assert_eq!(nc.estado, EstadoNoConformidad::EnTratamiento);
    assert!(nc.observaciones.is_none());

    nc.cerrar(Observacion { observaciones: Some("resuelto".into()) });
    assert_eq!(nc.estado, EstadoNoConformidad::Cerrada);
    assert_eq!(nc.observaciones.as_deref(), Some("resuelto"));
    assert!(nc.fecha_cierre.is_some());
}

#[test]
fn test_no_conformidad_fecha_limite_anterior() {
    let r = serde_json::from_value::<NuevaNoConformidad>(json!({
        "codigo": "NC-2",
        "descripcion": "x",
        "fechaDeteccion": "2024-05-10",
        "fechaLimite": "2024-05-01"
    })).unwrap()
       .validar();
    assert!(matches!(r, Err(DomainError::Validacion(_))));
}

#[test]
fn test_riesgo_escala_y_nivel() {
    let r = NuevoRiesgo { codigo: Some("R-1".into()),
                          descripcion: Some("Proveedor único".into()),
                          probabilidad: Some(4),
                          impacto: Some(5),
                          ..Default::default() }.validar()
                                                .unwrap();
    assert_eq!(r.nivel(), 20);
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["nivel"], 20);
    assert_eq!(v["procesoId"], json!(null));
    assert_eq!(v["estado"], "identificado");

    let fuera = NuevoRiesgo { codigo: Some("R-2".into()),
                              descripcion: Some("x".into()),
                              impacto: Some(9),
                              ..Default::default() }.validar();
    assert!(matches!(fuera, Err(DomainError::Validacion(_))));
}

#[test]
fn test_control_requiere_tipo() {
    let err = NuevoControlRiesgo { riesgo_id: Some(Uuid::new_v4()),
                                   descripcion: Some("Doble proveedor".into()),
                                   ..Default::default() }.validar()
                                                         .unwrap_err();
    assert_eq!(err, DomainError::CampoRequerido("tipo".into()));

    let parsed: NuevoControlRiesgo = serde_json::from_value(json!({
        "riesgoId": Uuid::new_v4(),
        "descripcion": "Revisión mensual",
        "tipo": "detectivo",
        "efectividad": "parcial"
    })).unwrap();
    let c = parsed.validar().unwrap();
    assert_eq!(c.tipo, TipoControl::Detectivo);
    assert_eq!(c.efectividad, Some(Efectividad::Parcial));
}

#[test]
fn test_catalogo_desconocido_falla_al_deserializar() {
    let r = serde_json::from_value::<NuevoRiesgo>(json!({"codigo": "R", "descripcion": "d", "estado": "inventado"}));
    assert!(r.is_err());
}

#[test]
fn test_asistencia_cambios_preservan_pareja() {
    let cap = Uuid::new_v4();
    let usr = Uuid::new_v4();
    let mut a = NuevaAsistencia { capacitacion_id: Some(cap),
                                  usuario_id: Some(usr),
                                  ..Default::default() }.validar()
                                                        .unwrap();
    assert!(!a.asistio);
    let cambios: CambiosAsistencia = serde_json::from_value(json!({"asistio": true})).unwrap();
    cambios.aplicar(&mut a).unwrap();
    assert!(a.asistio);
    assert_eq!(a.capacitacion_id, cap);
    assert_eq!(a.usuario_id, usr);
}

#[test]
fn test_capacitacion_fechas() {
    let r = serde_json::from_value::<NuevaCapacitacion>(json!({
        "nombre": "ISO 9001",
        "fechaInicio": "2024-03-10",
        "fechaFin": "2024-03-01"
    })).unwrap()
       .validar();
    assert!(r.is_err());

    let c = serde_json::from_value::<NuevaCapacitacion>(json!({
        "nombre": "ISO 9001",
        "fechaInicio": "2024-03-10",
        "duracionHoras": 8.5
    })).unwrap()
       .validar()
       .unwrap();
    assert_eq!(c.estado, EstadoCapacitacion::Programada);
}

#[test]
fn test_notificacion_entrega() {
    let mut n = NuevaNotificacion { usuario_id: Some(Uuid::new_v4()),
                                    tipo: Some("recordatorio".into()),
                                    ..Default::default() }.validar()
                                                          .unwrap();
    assert!(!n.entregada);
    assert!(n.entregada_en.is_none());
    n.marcar_entregada();
    assert!(n.entregada);
    assert!(n.entregada_en.is_some());
}

#[test]
fn test_auditoria_requeridos() {
    let err = NuevaAuditoria { entidad_tipo: Some("proceso".into()),
                               accion: Some("crear".into()),
                               ..Default::default() }.validar()
                                                     .unwrap_err();
    assert_eq!(err, DomainError::CampoRequerido("entidadId".into()));
}

#[test]
fn test_filtros_y_condiciones() {
    let area = Uuid::new_v4();
    let p = NuevoProceso { codigo: Some("P-9".into()),
                           nombre: Some("Ventas".into()),
                           area_id: Some(area),
                           ..Default::default() }.validar()
                                                 .unwrap();
    let filtro = Proceso::FILTROS.iter().find(|f| f.parametro == "areaId").unwrap();
    let valor = filtro.tipo.interpretar(filtro.parametro, &area.to_string()).unwrap();
    assert!(p.cumple(&[Condicion { campo: filtro.campo, valor }]));
    assert!(!p.cumple(&[Condicion { campo: "estado",
                                    valor: ValorCampo::Texto("obsoleto".into()) }]));
    assert!(filtro.tipo.interpretar("areaId", "no-es-uuid").is_err());
}

#[test]
fn test_filtro_de_catalogo_rechaza_valores_desconocidos() {
    let estado = NoConformidad::FILTROS.iter()
                                       .find(|f| f.parametro == "estado")
                                       .unwrap();
    assert_eq!(estado.tipo.interpretar("estado", "en_tratamiento").unwrap(),
               ValorCampo::Texto("en_tratamiento".into()));
    assert!(matches!(estado.tipo.interpretar("estado", "bogus"), Err(DomainError::Validacion(_))));
}

#[test]
fn test_cambios_null_limpia_y_ausente_conserva() {
    let mut nc: NoConformidad = serde_json::from_value::<NuevaNoConformidad>(json!({
        "codigo": "NC-1",
        "descripcion": "Registro incompleto",
        "fechaDeteccion": "2024-03-01",
        "fechaLimite": "2024-04-01",
        "origen": "auditoría interna"
    })).unwrap()
       .validar()
       .unwrap();

    let sin_cambios: CambiosNoConformidad = serde_json::from_value(json!({"descripcion": "Otra"})).unwrap();
    sin_cambios.aplicar(&mut nc).unwrap();
    assert_eq!(nc.fecha_limite.map(|f| f.to_string()).as_deref(), Some("2024-04-01"));
    assert_eq!(nc.origen.as_deref(), Some("auditoría interna"));

    let limpia: CambiosNoConformidad = serde_json::from_value(json!({"fechaLimite": null, "origen": null})).unwrap();
    assert_eq!(limpia.fecha_limite, Some(None));
    limpia.aplicar(&mut nc).unwrap();
    assert_eq!(nc.fecha_limite, None);
    assert_eq!(nc.origen, None);
    assert_eq!(nc.descripcion, "Otra");
}

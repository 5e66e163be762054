//! Esquema Diesel escrito a mano a partir de `migrations/`. Reemplazable con
//! `diesel print-schema`.

diesel::table! {
    usuarios (id) {
        id -> Uuid,
        nombre -> Text,
        apellido_paterno -> Nullable<Text>,
        apellido_materno -> Nullable<Text>,
        nombre_usuario -> Text,
        email -> Text,
        foto_url -> Nullable<Text>,
        activo -> Bool,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    areas (id) {
        id -> Uuid,
        codigo -> Text,
        nombre -> Text,
        descripcion -> Nullable<Text>,
        activo -> Bool,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    asignaciones (id) {
        id -> Uuid,
        area_id -> Uuid,
        usuario_id -> Uuid,
        es_principal -> Bool,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    procesos (id) {
        id -> Uuid,
        codigo -> Text,
        nombre -> Text,
        descripcion -> Nullable<Text>,
        objetivo -> Nullable<Text>,
        area_id -> Nullable<Uuid>,
        estado -> Text,
        version -> Text,
        fecha_revision -> Nullable<Date>,
        proxima_revision -> Nullable<Date>,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    etapas_proceso (id) {
        id -> Uuid,
        proceso_id -> Uuid,
        nombre -> Text,
        descripcion -> Nullable<Text>,
        orden -> Int4,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    instancias_proceso (id) {
        id -> Uuid,
        proceso_id -> Uuid,
        estado -> Text,
        iniciado_por -> Nullable<Uuid>,
        fecha_inicio -> Nullable<Timestamptz>,
        fecha_completado -> Nullable<Timestamptz>,
        etapa_actual_id -> Nullable<Uuid>,
        datos -> Jsonb,
        bloqueado -> Bool,
        motivo_bloqueo -> Nullable<Text>,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    acciones_proceso (id) {
        id -> Uuid,
        instancia_id -> Uuid,
        etapa_id -> Uuid,
        usuario_id -> Uuid,
        tipo_accion -> Text,
        comentario -> Nullable<Text>,
        tiempo_respuesta_segundos -> Nullable<Int8>,
        ejecutado_en -> Timestamptz,
        creado_en -> Timestamptz,
    }
}

diesel::table! {
    no_conformidades (id) {
        id -> Uuid,
        codigo -> Text,
        descripcion -> Text,
        gravedad -> Text,
        origen -> Nullable<Text>,
        fecha_deteccion -> Date,
        fecha_limite -> Nullable<Date>,
        area_id -> Nullable<Uuid>,
        responsable_id -> Nullable<Uuid>,
        estado -> Text,
        observaciones -> Nullable<Text>,
        fecha_cierre -> Nullable<Timestamptz>,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    acciones_correctivas (id) {
        id -> Uuid,
        no_conformidad_id -> Uuid,
        descripcion -> Text,
        responsable_id -> Nullable<Uuid>,
        fecha_compromiso -> Nullable<Date>,
        estado -> Text,
        observaciones -> Nullable<Text>,
        fecha_completado -> Nullable<Timestamptz>,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    riesgos (id) {
        id -> Uuid,
        codigo -> Text,
        descripcion -> Text,
        proceso_id -> Nullable<Uuid>,
        area_id -> Nullable<Uuid>,
        probabilidad -> Int4,
        impacto -> Int4,
        estado -> Text,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    controles_riesgo (id) {
        id -> Uuid,
        riesgo_id -> Uuid,
        descripcion -> Text,
        tipo -> Text,
        responsable_id -> Nullable<Uuid>,
        frecuencia -> Nullable<Text>,
        efectividad -> Nullable<Text>,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    capacitaciones (id) {
        id -> Uuid,
        nombre -> Text,
        descripcion -> Nullable<Text>,
        instructor -> Nullable<Text>,
        fecha_inicio -> Date,
        fecha_fin -> Nullable<Date>,
        duracion_horas -> Nullable<Float8>,
        modalidad -> Nullable<Text>,
        estado -> Text,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    asistencias_capacitacion (id) {
        id -> Uuid,
        capacitacion_id -> Uuid,
        usuario_id -> Uuid,
        asistio -> Bool,
        calificacion -> Nullable<Float8>,
        comentarios -> Nullable<Text>,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    documentos (id) {
        id -> Uuid,
        titulo -> Text,
        descripcion -> Nullable<Text>,
        tipo_mime -> Nullable<Text>,
        ruta_almacenamiento -> Nullable<Text>,
        url -> Nullable<Text>,
        tamano_bytes -> Nullable<Int8>,
        contenido -> Nullable<Text>,
        subido_por -> Nullable<Uuid>,
        revisado_por -> Nullable<Uuid>,
        visibilidad -> Text,
        version -> Text,
        fecha_revision -> Nullable<Date>,
        proxima_revision -> Nullable<Date>,
        proceso_id -> Nullable<Uuid>,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    notificaciones (id) {
        id -> Uuid,
        usuario_id -> Uuid,
        tipo -> Text,
        contenido -> Jsonb,
        entregada -> Bool,
        entregada_en -> Nullable<Timestamptz>,
        creado_en -> Timestamptz,
        actualizado_en -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    auditoria (id) {
        id -> Uuid,
        usuario_id -> Nullable<Uuid>,
        entidad_tipo -> Text,
        entidad_id -> Uuid,
        accion -> Text,
        detalles -> Jsonb,
        creado_en -> Timestamptz,
    }
}

diesel::joinable!(asignaciones -> areas (area_id));
diesel::joinable!(asignaciones -> usuarios (usuario_id));
diesel::joinable!(etapas_proceso -> procesos (proceso_id));
diesel::joinable!(acciones_proceso -> instancias_proceso (instancia_id));
diesel::joinable!(acciones_correctivas -> no_conformidades (no_conformidad_id));
diesel::joinable!(controles_riesgo -> riesgos (riesgo_id));
diesel::joinable!(asistencias_capacitacion -> capacitaciones (capacitacion_id));
diesel::joinable!(notificaciones -> usuarios (usuario_id));

diesel::allow_tables_to_appear_in_same_query!(
    usuarios,
    areas,
    asignaciones,
    procesos,
    etapas_proceso,
    instancias_proceso,
    acciones_proceso,
    no_conformidades,
    acciones_correctivas,
    riesgos,
    controles_riesgo,
    capacitaciones,
    asistencias_capacitacion,
    documentos,
    notificaciones,
    auditoria,
);

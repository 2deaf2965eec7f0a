mod type_check_spec;
mod type_emitter_spec;

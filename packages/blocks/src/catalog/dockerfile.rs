//! Dockerfile instruction kinds. One statement per instruction line;
//! all untagged, so instructions chain in any order.

use crate::registry::{KindSpec, Registry};

pub fn install(registry: &mut Registry) {
    registry.define(KindSpec::statement("dockerfile_from", None).text_field("IMAGE", "ubuntu:latest"));
    registry.define(KindSpec::statement("dockerfile_run", None).text_field("COMMAND", "apt-get update"));
    registry.define(
        KindSpec::statement("dockerfile_cmd", None)
            .text_field("COMMAND", "[\"nginx\", \"-g\", \"daemon off;\"]"),
    );
    registry.define(KindSpec::statement("dockerfile_expose", None).int_field("PORT", 80));
    registry.define(
        KindSpec::statement("dockerfile_env", None)
            .text_field("KEY", "NODE_ENV")
            .text_field("VALUE", "production"),
    );
    registry.define(
        KindSpec::statement("dockerfile_copy", None)
            .text_field("SOURCE", "./src")
            .text_field("DEST", "/app/src"),
    );
    registry.define(
        KindSpec::statement("dockerfile_add", None)
            .text_field("SOURCE", "./app.tar.gz")
            .text_field("DEST", "/app/"),
    );
    registry.define(KindSpec::statement("dockerfile_workdir", None).text_field("DIR", "/app"));
    registry.define(KindSpec::statement("dockerfile_user", None).text_field("USER", "node"));
    registry.define(
        KindSpec::statement("dockerfile_arg", None)
            .text_field("NAME", "VERSION")
            .text_field("DEFAULT", "latest"),
    );
    registry.define(
        KindSpec::statement("dockerfile_entrypoint", None)
            .text_field("COMMAND", "[\"docker-entrypoint.sh\"]"),
    );
    registry.define(KindSpec::statement("dockerfile_volume", None).text_field("PATH", "/data"));
    registry.define(
        KindSpec::statement("dockerfile_label", None)
            .text_field("KEY", "version")
            .text_field("VALUE", "1.0"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::FieldValue;

    #[test]
    fn test_expose_port_is_integer() {
        let mut registry = Registry::new();
        install(&mut registry);

        let expose = registry.get("dockerfile_expose").unwrap();
        assert_eq!(expose.field_spec("PORT").unwrap().default, FieldValue::Int(80));
    }

    #[test]
    fn test_instructions_are_untagged_statements() {
        let mut registry = Registry::new();
        install(&mut registry);

        for kind in ["dockerfile_from", "dockerfile_run", "dockerfile_label"] {
            let spec = registry.get(kind).unwrap();
            assert!(!spec.shape.is_value());
            assert_eq!(spec.shape.tag(), None);
        }
    }
}

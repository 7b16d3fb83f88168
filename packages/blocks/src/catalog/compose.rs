//! Docker Compose kinds.
//!
//! `compose_root` anchors a document; services, named networks, and
//! volume mounts carry stack tags so the root's sections only accept
//! their own row type, while the per-service config lines are untagged
//! and chain freely inside a service.

use crate::registry::{KindSpec, Registry};

pub fn install(registry: &mut Registry) {
    registry.define(
        KindSpec::statement("compose_root", None)
            .statement_socket("SERVICES", Some("Service"))
            .statement_socket("VOLUMES", Some("Volume"))
            .statement_socket("NETWORKS", Some("Network")),
    );
    registry.define(
        KindSpec::statement("compose_service", Some("Service"))
            .text_field("NAME", "service_name")
            .statement_socket("CONFIG", None),
    );

    // Service config lines.
    registry.define(KindSpec::statement("compose_image", None).text_field("IMAGE", "nginx:latest"));
    registry.define(KindSpec::statement("compose_ports", None).text_field("PORTS", "8080:80"));
    registry.define(
        KindSpec::statement("compose_environment", None)
            .text_field("KEY", "KEY")
            .text_field("VALUE", "value"),
    );
    registry.define(KindSpec::statement("compose_command", None).text_field("CMD", "npm start"));
    registry.define(
        KindSpec::statement("compose_restart", None)
            .choice_field("POLICY", &["always", "unless-stopped", "on-failure", "no"]),
    );
    registry.define(KindSpec::statement("compose_depends_on", None).text_field("DEPS", "db,cache"));
    registry.define(
        KindSpec::statement("compose_healthcheck", None)
            .text_field("TEST", "curl -f http://localhost/ || exit 1")
            .text_field("INTERVAL", "30s")
            .text_field("TIMEOUT", "10s")
            .int_field("RETRIES", 3),
    );

    registry.define(
        KindSpec::statement("compose_volumes", Some("Volume")).text_field("VOLUME", "./data:/data"),
    );
    registry.define(
        KindSpec::statement("compose_networks", Some("Network"))
            .text_field("NAME", "frontend")
            .statement_socket("CONFIG", None),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_sections_are_tagged() {
        let mut registry = Registry::new();
        install(&mut registry);

        let root = registry.get("compose_root").unwrap();
        let services = root.sockets.iter().find(|s| s.name == "SERVICES").unwrap();
        assert_eq!(services.accepts, Some("Service".to_string()));

        let service = registry.get("compose_service").unwrap();
        assert_eq!(service.shape.tag(), Some("Service"));
        // Config rows are untagged so any config line chains inside.
        let config = service.sockets.iter().find(|s| s.name == "CONFIG").unwrap();
        assert_eq!(config.accepts, None);
    }
}

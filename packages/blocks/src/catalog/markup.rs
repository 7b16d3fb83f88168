//! Tag-markup kinds: tags and their attributes.

use crate::registry::{KindSpec, Registry};

pub fn install(registry: &mut Registry) {
    // The closing tag is derived from TAG_NAME at emission time, so a
    // rename propagates without duplicated state.
    registry.define(
        KindSpec::statement("xml_tag", None)
            .text_field("TAG_NAME", "tag")
            .statement_socket("ATTRIBUTES", Some("XmlAttribute"))
            .statement_socket("CHILDREN", None),
    );
    registry.define(
        KindSpec::statement("xml_attribute", Some("XmlAttribute"))
            .text_field("ATTR_NAME", "attr")
            .value_socket("VALUE", Some("String")),
    );
}

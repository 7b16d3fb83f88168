//! Generic structured-data kinds: containers, pairs, and scalars.

use crate::registry::{KindSpec, Registry};

pub fn install(registry: &mut Registry) {
    // Containers adjust their slot count through the mutation layer;
    // both start with a single slot.
    registry.define(
        KindSpec::value("dict_create_with", "Dictionary").dynamic_sockets("PAIR", Some("KeyValuePair")),
    );
    registry.define(KindSpec::value("list_create_with", "Array").dynamic_sockets("ADD", None));

    registry.define(
        KindSpec::value("key_value_pair", "KeyValuePair")
            .value_socket("KEY", Some("String"))
            .value_socket("VALUE", None),
    );

    registry.define(KindSpec::value("text", "String").text_field("TEXT", ""));
    registry.define(KindSpec::value("math_number", "Number").int_field("NUM", 0));
    registry.define(KindSpec::value("logic_boolean", "Boolean").choice_field("BOOL", &["TRUE", "FALSE"]));

    // Statement-flavored mapping builders: a keyed section whose body
    // is a statement chain rather than plugged value slots.
    registry.define(
        KindSpec::statement("yaml_object", None)
            .text_field("KEY", "name")
            .statement_socket("PROPERTIES", None),
    );
    registry.define(
        KindSpec::statement("yaml_array", None)
            .text_field("KEY", "items")
            .statement_socket("ITEMS", None),
    );
    registry.define(
        KindSpec::statement("yaml_key_value", None)
            .text_field("KEY", "key")
            .text_field("VALUE", "value"),
    );
}

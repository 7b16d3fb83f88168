//! End-to-end generation tests over the built-in catalog.

use blocked_blocks::catalog::standard_registry;
use blocked_blocks::{FieldValue, Registry, Workspace};
use blocked_codegen::{generate, Dialect, GenerateError};
use blocked_editor::set_item_count;

fn setup() -> (Registry, Workspace) {
    (standard_registry(), Workspace::new())
}

fn text_block(registry: &Registry, ws: &mut Workspace, content: &str) -> String {
    let id = ws.create_block(registry, "text").unwrap();
    ws.set_field(&id, "TEXT", FieldValue::Text(content.to_string()))
        .unwrap();
    id
}

#[test]
fn test_empty_graph_placeholders() {
    let ws = Workspace::new();
    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), "# Empty YAML file");
    assert_eq!(generate(&ws, &Dialect::xml()).unwrap(), "<!-- Empty XML file -->");
    assert_eq!(generate(&ws, &Dialect::dockerfile()).unwrap(), "# Empty Dockerfile");
}

#[test]
fn test_key_value_round_trip() {
    let (registry, mut ws) = setup();
    let pair = ws.create_block(&registry, "key_value_pair").unwrap();
    let key = text_block(&registry, &mut ws, "name");
    let value = text_block(&registry, &mut ws, "Alice");
    ws.connect(&pair, "KEY", &key).unwrap();
    ws.connect(&pair, "VALUE", &value).unwrap();

    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), "name: Alice");
}

#[test]
fn test_list_renders_items_in_order() {
    let (registry, mut ws) = setup();
    let list = ws.create_block(&registry, "list_create_with").unwrap();
    set_item_count(&mut ws, &list, 2).unwrap();

    let apple = text_block(&registry, &mut ws, "apple");
    let banana = text_block(&registry, &mut ws, "banana");
    ws.connect(&list, "ADD0", &apple).unwrap();
    ws.connect(&list, "ADD1", &banana).unwrap();

    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), "- apple\n- banana");
}

#[test]
fn test_nested_dict_indents_value_below_key() {
    let (registry, mut ws) = setup();
    let outer = ws.create_block(&registry, "dict_create_with").unwrap();
    let pair = ws.create_block(&registry, "key_value_pair").unwrap();
    let key = text_block(&registry, &mut ws, "server");
    let inner = ws.create_block(&registry, "dict_create_with").unwrap();
    let inner_pair = ws.create_block(&registry, "key_value_pair").unwrap();
    let inner_key = text_block(&registry, &mut ws, "host");
    let inner_value = text_block(&registry, &mut ws, "localhost");

    ws.connect(&outer, "PAIR0", &pair).unwrap();
    ws.connect(&pair, "KEY", &key).unwrap();
    ws.connect(&pair, "VALUE", &inner).unwrap();
    ws.connect(&inner, "PAIR0", &inner_pair).unwrap();
    ws.connect(&inner_pair, "KEY", &inner_key).unwrap();
    ws.connect(&inner_pair, "VALUE", &inner_value).unwrap();

    let code = generate(&ws, &Dialect::yaml()).unwrap();
    assert_eq!(code, "server:\n  host: localhost");

    // The key line stays unindented; only the nested value moves in.
    let lines: Vec<&str> = code.lines().collect();
    assert_eq!(lines[0], "server:");
    assert!(lines[1].starts_with("  "));
}

#[test]
fn test_quoted_keys_demote_to_bare_tokens() {
    let (registry, mut ws) = setup();
    let pair = ws.create_block(&registry, "key_value_pair").unwrap();
    let key = text_block(&registry, &mut ws, "'name'");
    let value = text_block(&registry, &mut ws, "Alice");
    ws.connect(&pair, "KEY", &key).unwrap();
    ws.connect(&pair, "VALUE", &value).unwrap();

    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), "name: Alice");

    ws.set_field(&key, "TEXT", FieldValue::Text("\"name\"".to_string()))
        .unwrap();
    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), "name: Alice");
}

#[test]
fn test_unfilled_pair_renders_defaults() {
    let (registry, mut ws) = setup();
    ws.create_block(&registry, "key_value_pair").unwrap();

    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), ": \"\"");
}

#[test]
fn test_scalars_in_pairs() {
    let (registry, mut ws) = setup();
    let pair = ws.create_block(&registry, "key_value_pair").unwrap();
    let key = text_block(&registry, &mut ws, "enabled");
    let flag = ws.create_block(&registry, "logic_boolean").unwrap();
    ws.connect(&pair, "KEY", &key).unwrap();
    ws.connect(&pair, "VALUE", &flag).unwrap();

    // The default choice TRUE renders lower-cased.
    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), "enabled: true");

    ws.disconnect(&pair, "VALUE").unwrap();
    let count = ws.create_block(&registry, "math_number").unwrap();
    ws.set_field(&count, "NUM", FieldValue::Int(42)).unwrap();
    ws.connect(&pair, "VALUE", &count).unwrap();
    ws.remove_block(&flag).unwrap();

    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), "enabled: 42");
}

#[test]
fn test_arity_reconciliation_through_generation() {
    let (registry, mut ws) = setup();
    let list = ws.create_block(&registry, "list_create_with").unwrap();
    set_item_count(&mut ws, &list, 3).unwrap();

    let a = text_block(&registry, &mut ws, "a");
    let b = text_block(&registry, &mut ws, "b");
    let c = text_block(&registry, &mut ws, "c");
    ws.connect(&list, "ADD0", &a).unwrap();
    ws.connect(&list, "ADD1", &b).unwrap();
    ws.connect(&list, "ADD2", &c).unwrap();

    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), "- a\n- b\n- c");

    // Shrinking detaches the last item; it survives as a top-level
    // block and keeps rendering, loose, after the list.
    set_item_count(&mut ws, &list, 2).unwrap();
    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), "- a\n- b\nc");

    // Growing back mints an empty slot, not the old connection.
    set_item_count(&mut ws, &list, 3).unwrap();
    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), "- a\n- b\n- \"\"\nc");
}

#[test]
fn test_self_closing_tag() {
    let (registry, mut ws) = setup();
    let tag = ws.create_block(&registry, "xml_tag").unwrap();
    ws.set_field(&tag, "TAG_NAME", FieldValue::Text("name".to_string()))
        .unwrap();

    assert_eq!(generate(&ws, &Dialect::xml()).unwrap(), "<name/>");
}

#[test]
fn test_tag_with_child_and_rename_propagation() {
    let (registry, mut ws) = setup();
    let parent = ws.create_block(&registry, "xml_tag").unwrap();
    let child = ws.create_block(&registry, "xml_tag").unwrap();
    ws.set_field(&parent, "TAG_NAME", FieldValue::Text("name".to_string()))
        .unwrap();
    ws.set_field(&child, "TAG_NAME", FieldValue::Text("child".to_string()))
        .unwrap();
    ws.connect(&parent, "CHILDREN", &child).unwrap();

    assert_eq!(
        generate(&ws, &Dialect::xml()).unwrap(),
        "<name>\n  <child/>\n</name>"
    );

    // Renaming after creation moves both the opening and closing tag.
    ws.set_field(&parent, "TAG_NAME", FieldValue::Text("section".to_string()))
        .unwrap();
    assert_eq!(
        generate(&ws, &Dialect::xml()).unwrap(),
        "<section>\n  <child/>\n</section>"
    );
}

#[test]
fn test_attributes_join_inline() {
    let (registry, mut ws) = setup();
    let tag = ws.create_block(&registry, "xml_tag").unwrap();
    ws.set_field(&tag, "TAG_NAME", FieldValue::Text("div".to_string()))
        .unwrap();

    let class_attr = ws.create_block(&registry, "xml_attribute").unwrap();
    ws.set_field(&class_attr, "ATTR_NAME", FieldValue::Text("class".to_string()))
        .unwrap();
    let class_value = text_block(&registry, &mut ws, "container");
    ws.connect(&class_attr, "VALUE", &class_value).unwrap();

    let id_attr = ws.create_block(&registry, "xml_attribute").unwrap();
    ws.set_field(&id_attr, "ATTR_NAME", FieldValue::Text("id".to_string()))
        .unwrap();
    let id_value = text_block(&registry, &mut ws, "main");
    ws.connect(&id_attr, "VALUE", &id_value).unwrap();

    ws.connect(&tag, "ATTRIBUTES", &class_attr).unwrap();
    ws.stack(&class_attr, &id_attr).unwrap();

    assert_eq!(
        generate(&ws, &Dialect::xml()).unwrap(),
        "<div class='container' id='main'/>"
    );
}

#[test]
fn test_empty_tag_and_attribute_names_fall_back() {
    let (registry, mut ws) = setup();
    let tag = ws.create_block(&registry, "xml_tag").unwrap();
    ws.set_field(&tag, "TAG_NAME", FieldValue::Text(String::new()))
        .unwrap();

    assert_eq!(generate(&ws, &Dialect::xml()).unwrap(), "<tag/>");

    let attr = ws.create_block(&registry, "xml_attribute").unwrap();
    ws.set_field(&attr, "ATTR_NAME", FieldValue::Text(String::new()))
        .unwrap();
    ws.connect(&tag, "ATTRIBUTES", &attr).unwrap();

    assert_eq!(
        generate(&ws, &Dialect::xml()).unwrap(),
        "<tag attribute=\"\"/>"
    );
}

#[test]
fn test_missing_generator_aborts_whole_call() {
    let (registry, mut ws) = setup();
    text_block(&registry, &mut ws, "fine");
    ws.create_block(&registry, "xml_tag").unwrap();

    // The text block alone would render, but the call must not hand
    // back partial output.
    let err = generate(&ws, &Dialect::yaml()).unwrap_err();
    assert_eq!(
        err,
        GenerateError::MissingGenerator {
            dialect: "yaml".to_string(),
            kind: "xml_tag".to_string(),
        }
    );
    assert!(err.to_string().contains("xml_tag"), "error should name the kind");
}

#[test]
fn test_compose_document() {
    let (registry, mut ws) = setup();
    let root = ws.create_block(&registry, "compose_root").unwrap();
    let service = ws.create_block(&registry, "compose_service").unwrap();
    ws.set_field(&service, "NAME", FieldValue::Text("web".to_string()))
        .unwrap();
    let image = ws.create_block(&registry, "compose_image").unwrap();
    let ports = ws.create_block(&registry, "compose_ports").unwrap();
    let network = ws.create_block(&registry, "compose_networks").unwrap();

    ws.connect(&root, "SERVICES", &service).unwrap();
    ws.connect(&service, "CONFIG", &image).unwrap();
    ws.stack(&image, &ports).unwrap();
    ws.connect(&root, "NETWORKS", &network).unwrap();

    let expected = "\
version: \"3.8\"
services:
  web:
    image: nginx:latest
    ports:
      - \"8080:80\"
networks:
  frontend:
    driver: bridge";
    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), expected);
}

#[test]
fn test_compose_root_alone_keeps_version_only() {
    let (registry, mut ws) = setup();
    ws.create_block(&registry, "compose_root").unwrap();

    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), "version: \"3.8\"");
}

#[test]
fn test_compose_service_config_lines() {
    let (registry, mut ws) = setup();
    let root = ws.create_block(&registry, "compose_root").unwrap();
    let service = ws.create_block(&registry, "compose_service").unwrap();
    ws.set_field(&service, "NAME", FieldValue::Text("api".to_string()))
        .unwrap();
    let env = ws.create_block(&registry, "compose_environment").unwrap();
    ws.set_field(&env, "KEY", FieldValue::Text("NODE_ENV".to_string()))
        .unwrap();
    ws.set_field(&env, "VALUE", FieldValue::Text("production".to_string()))
        .unwrap();
    let restart = ws.create_block(&registry, "compose_restart").unwrap();
    let deps = ws.create_block(&registry, "compose_depends_on").unwrap();
    ws.set_field(&deps, "DEPS", FieldValue::Text("db,cache".to_string()))
        .unwrap();

    ws.connect(&root, "SERVICES", &service).unwrap();
    ws.connect(&service, "CONFIG", &env).unwrap();
    ws.stack(&env, &restart).unwrap();
    ws.stack(&restart, &deps).unwrap();

    let expected = "\
version: \"3.8\"
services:
  api:
    environment:
      NODE_ENV: \"production\"
    restart: always
    depends_on:
      - db
      - cache";
    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), expected);
}

#[test]
fn test_compose_healthcheck_and_mounts() {
    let (registry, mut ws) = setup();
    let service = ws.create_block(&registry, "compose_service").unwrap();
    let health = ws.create_block(&registry, "compose_healthcheck").unwrap();
    let mounts = ws.create_block(&registry, "compose_volumes").unwrap();

    ws.connect(&service, "CONFIG", &health).unwrap();
    ws.stack(&health, &mounts).unwrap();

    let expected = "\
service_name:
  healthcheck:
    test: [\"CMD\", \"curl -f http://localhost/ || exit 1\"]
    interval: 30s
    timeout: 10s
    retries: 3
  volumes:
    - \"./data:/data\"";
    assert_eq!(generate(&ws, &Dialect::yaml()).unwrap(), expected);
}

#[test]
fn test_empty_depends_on_takes_no_line() {
    let (registry, mut ws) = setup();
    let service = ws.create_block(&registry, "compose_service").unwrap();
    let image = ws.create_block(&registry, "compose_image").unwrap();
    let deps = ws.create_block(&registry, "compose_depends_on").unwrap();
    ws.set_field(&deps, "DEPS", FieldValue::Text(String::new()))
        .unwrap();

    ws.connect(&service, "CONFIG", &image).unwrap();
    ws.stack(&image, &deps).unwrap();

    assert_eq!(
        generate(&ws, &Dialect::yaml()).unwrap(),
        "service_name:\n  image: nginx:latest"
    );
}

#[test]
fn test_yaml_object_sections() {
    let (registry, mut ws) = setup();
    let object = ws.create_block(&registry, "yaml_object").unwrap();
    ws.set_field(&object, "KEY", FieldValue::Text("app".to_string()))
        .unwrap();
    let first = ws.create_block(&registry, "yaml_key_value").unwrap();
    ws.set_field(&first, "KEY", FieldValue::Text("name".to_string()))
        .unwrap();
    ws.set_field(&first, "VALUE", FieldValue::Text("myapp".to_string()))
        .unwrap();
    let second = ws.create_block(&registry, "yaml_key_value").unwrap();
    ws.set_field(&second, "KEY", FieldValue::Text("version".to_string()))
        .unwrap();
    ws.set_field(&second, "VALUE", FieldValue::Text("1.0".to_string()))
        .unwrap();

    ws.connect(&object, "PROPERTIES", &first).unwrap();
    ws.stack(&first, &second).unwrap();

    assert_eq!(
        generate(&ws, &Dialect::yaml()).unwrap(),
        "app:\n  name: myapp\n  version: 1.0"
    );
}

#[test]
fn test_dockerfile_document() {
    let (registry, mut ws) = setup();
    let from = ws.create_block(&registry, "dockerfile_from").unwrap();
    let run = ws.create_block(&registry, "dockerfile_run").unwrap();
    let env = ws.create_block(&registry, "dockerfile_env").unwrap();
    let expose = ws.create_block(&registry, "dockerfile_expose").unwrap();
    let cmd = ws.create_block(&registry, "dockerfile_cmd").unwrap();

    ws.stack(&from, &run).unwrap();
    ws.stack(&run, &env).unwrap();
    ws.stack(&env, &expose).unwrap();
    ws.stack(&expose, &cmd).unwrap();

    let expected = "\
FROM ubuntu:latest
RUN apt-get update
ENV NODE_ENV=production
EXPOSE 80
CMD [\"nginx\", \"-g\", \"daemon off;\"]";
    assert_eq!(generate(&ws, &Dialect::dockerfile()).unwrap(), expected);
}

#[test]
fn test_dockerfile_arg_with_and_without_default() {
    let (registry, mut ws) = setup();
    let arg = ws.create_block(&registry, "dockerfile_arg").unwrap();

    assert_eq!(generate(&ws, &Dialect::dockerfile()).unwrap(), "ARG VERSION=latest");

    ws.set_field(&arg, "DEFAULT", FieldValue::Text(String::new()))
        .unwrap();
    assert_eq!(generate(&ws, &Dialect::dockerfile()).unwrap(), "ARG VERSION");
}

#[test]
fn test_generation_is_deterministic() {
    let (registry, mut ws) = setup();
    let root = ws.create_block(&registry, "compose_root").unwrap();
    let service = ws.create_block(&registry, "compose_service").unwrap();
    let image = ws.create_block(&registry, "compose_image").unwrap();
    ws.connect(&root, "SERVICES", &service).unwrap();
    ws.connect(&service, "CONFIG", &image).unwrap();

    let first = generate(&ws, &Dialect::yaml()).unwrap();
    let second = generate(&ws, &Dialect::yaml()).unwrap();
    assert_eq!(first, second);
}

//! Structured-data emission rules: YAML mappings, sequences, scalars,
//! and the Docker Compose document kinds.

use crate::dialect::Dialect;
use crate::generator::{indent_lines, EmitContext, Fragment, GenResult, Precedence};

/// Build the yaml dialect table.
pub fn dialect() -> Dialect {
    Dialect::new("yaml", "  ", "# Empty YAML file")
        .rule("dict_create_with", dict_create_with)
        .rule("key_value_pair", key_value_pair)
        .rule("list_create_with", list_create_with)
        .rule("text", text)
        .rule("math_number", math_number)
        .rule("logic_boolean", logic_boolean)
        .rule("yaml_object", yaml_object)
        .rule("yaml_array", yaml_array)
        .rule("yaml_key_value", yaml_key_value)
        .rule("compose_root", compose_root)
        .rule("compose_service", compose_service)
        .rule("compose_image", compose_image)
        .rule("compose_ports", compose_ports)
        .rule("compose_environment", compose_environment)
        .rule("compose_command", compose_command)
        .rule("compose_restart", compose_restart)
        .rule("compose_depends_on", compose_depends_on)
        .rule("compose_healthcheck", compose_healthcheck)
        .rule("compose_volumes", compose_volumes)
        .rule("compose_networks", compose_networks)
}

/// Mapping container: its non-empty entries, one per line.
fn dict_create_with(ctx: &mut EmitContext) -> GenResult<Fragment> {
    let mut entries = Vec::new();
    for i in 0..ctx.item_count() {
        if let Some((pair, _)) = ctx.item_code(i)? {
            if !pair.is_empty() {
                entries.push(pair);
            }
        }
    }
    Ok(Fragment::nested(entries.join("\n")))
}

/// `key: value`. Keys demote to bare tokens; a nested value moves
/// below the key line, indented one unit.
fn key_value_pair(ctx: &mut EmitContext) -> GenResult<Fragment> {
    let key = match ctx.child_code("KEY")? {
        Some((text, _)) => demote_key(&text),
        None => String::new(),
    };
    let (value, precedence) = match ctx.child_code("VALUE")? {
        Some((text, precedence)) if !text.is_empty() => (text, precedence),
        _ => ("\"\"".to_string(), Precedence::Atomic),
    };

    Ok(match precedence {
        Precedence::Atomic => Fragment::atomic(format!("{}: {}", key, value)),
        Precedence::Nested => {
            Fragment::nested(format!("{}:\n{}", key, indent_lines(&value, ctx.indent())))
        }
    })
}

/// Sequence container: `- item` per slot. Continuation lines of a
/// nested item are indented under the marker, not re-marked.
fn list_create_with(ctx: &mut EmitContext) -> GenResult<Fragment> {
    let mut lines = Vec::new();
    for i in 0..ctx.item_count() {
        match ctx.item_code(i)? {
            Some((text, Precedence::Nested)) if !text.is_empty() => {
                for (j, line) in text.lines().enumerate() {
                    if j == 0 {
                        lines.push(format!("- {}", line));
                    } else {
                        lines.push(format!("{}{}", ctx.indent(), line));
                    }
                }
            }
            Some((text, _)) if !text.is_empty() => lines.push(format!("- {}", text)),
            _ => lines.push("- \"\"".to_string()),
        }
    }
    Ok(Fragment::nested(lines.join("\n")))
}

fn text(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::atomic(ctx.field_text("TEXT")))
}

pub(crate) fn math_number(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::atomic(ctx.field_text("NUM")))
}

/// Booleans render lower-cased (`TRUE` → `true`).
pub(crate) fn logic_boolean(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::atomic(ctx.field_text("BOOL").to_lowercase()))
}

/// Keyed mapping section: `key:` above its indented property rows.
fn yaml_object(ctx: &mut EmitContext) -> GenResult<Fragment> {
    let key = ctx.field_text("KEY");
    let properties = ctx.statement_code("PROPERTIES")?;
    Ok(Fragment::statement(section(&key, &properties)))
}

fn yaml_array(ctx: &mut EmitContext) -> GenResult<Fragment> {
    let key = ctx.field_text("KEY");
    let items = ctx.statement_code("ITEMS")?;
    Ok(Fragment::statement(section(&key, &items)))
}

fn yaml_key_value(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!(
        "{}: {}",
        ctx.field_text("KEY"),
        ctx.field_text("VALUE")
    )))
}

/// Compose document root: pinned version header plus the non-empty
/// top-level sections.
fn compose_root(ctx: &mut EmitContext) -> GenResult<Fragment> {
    let services = ctx.statement_code("SERVICES")?;
    let volumes = ctx.statement_code("VOLUMES")?;
    let networks = ctx.statement_code("NETWORKS")?;

    let mut out = String::from("version: \"3.8\"");
    for (header, body) in [
        ("services", services),
        ("volumes", volumes),
        ("networks", networks),
    ] {
        if !body.is_empty() {
            out.push_str(&format!("\n{}:\n{}", header, body));
        }
    }
    Ok(Fragment::statement(out))
}

fn compose_service(ctx: &mut EmitContext) -> GenResult<Fragment> {
    let name = ctx.field_text("NAME");
    let config = ctx.statement_code("CONFIG")?;
    Ok(Fragment::statement(section(&name, &config)))
}

fn compose_image(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!("image: {}", ctx.field_text("IMAGE"))))
}

fn compose_ports(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!(
        "ports:\n{}- \"{}\"",
        ctx.indent(),
        ctx.field_text("PORTS")
    )))
}

fn compose_environment(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!(
        "environment:\n{}{}: \"{}\"",
        ctx.indent(),
        ctx.field_text("KEY"),
        ctx.field_text("VALUE")
    )))
}

fn compose_command(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!("command: {}", ctx.field_text("CMD"))))
}

fn compose_restart(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!("restart: {}", ctx.field_text("POLICY"))))
}

/// Comma-separated dependency list; renders nothing when empty.
fn compose_depends_on(ctx: &mut EmitContext) -> GenResult<Fragment> {
    let deps = ctx.field_text("DEPS");
    let entries: Vec<&str> = deps
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();
    if entries.is_empty() {
        return Ok(Fragment::statement(String::new()));
    }

    let mut out = String::from("depends_on:");
    for dep in entries {
        out.push_str(&format!("\n{}- {}", ctx.indent(), dep));
    }
    Ok(Fragment::statement(out))
}

fn compose_healthcheck(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!(
        "healthcheck:\n{i}test: [\"CMD\", \"{}\"]\n{i}interval: {}\n{i}timeout: {}\n{i}retries: {}",
        ctx.field_text("TEST"),
        ctx.field_text("INTERVAL"),
        ctx.field_text("TIMEOUT"),
        ctx.field_text("RETRIES"),
        i = ctx.indent(),
    )))
}

/// Volume mount row in the service-config form, wherever it chains.
fn compose_volumes(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!(
        "volumes:\n{}- \"{}\"",
        ctx.indent(),
        ctx.field_text("VOLUME")
    )))
}

/// Named network definition; defaults to the bridge driver when no
/// config rows are attached.
fn compose_networks(ctx: &mut EmitContext) -> GenResult<Fragment> {
    let name = ctx.field_text("NAME");
    let config = ctx.statement_code("CONFIG")?;
    if config.is_empty() {
        Ok(Fragment::statement(format!(
            "{}:\n{}driver: bridge",
            name,
            ctx.indent()
        )))
    } else {
        Ok(Fragment::statement(format!("{}:\n{}", name, config)))
    }
}

/// `key:` header over an indented body; bare `key:` when the body is
/// empty.
fn section(key: &str, body: &str) -> String {
    if body.is_empty() {
        format!("{}:", key)
    } else {
        format!("{}:\n{}", key, body)
    }
}

/// Mapping keys must not carry literal quote marks.
fn demote_key(text: &str) -> String {
    text.replace(['\'', '"'], "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use blocked_blocks::catalog::standard_registry;

    #[test]
    fn test_demote_key_strips_both_quote_kinds() {
        assert_eq!(demote_key("name"), "name");
        assert_eq!(demote_key("'name'"), "name");
        assert_eq!(demote_key("\"name\""), "name");
        assert_eq!(demote_key("\"\""), "");
    }

    #[test]
    fn test_section_with_and_without_body() {
        assert_eq!(section("web", ""), "web:");
        assert_eq!(section("web", "  image: nginx"), "web:\n  image: nginx");
    }

    #[test]
    fn test_table_covers_structured_and_compose_kinds() {
        let dialect = dialect();
        let registry = standard_registry();
        for spec in registry.kinds() {
            if spec.name.starts_with("dockerfile_") || spec.name.starts_with("xml_") {
                continue;
            }
            assert!(dialect.has_rule(&spec.name), "no yaml rule for {}", spec.name);
        }
    }
}

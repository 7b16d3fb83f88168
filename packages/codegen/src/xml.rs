//! Tag markup emission rules.
//!
//! Number and boolean scalars render exactly as in yaml and share its
//! rules; text diverges (single-quoted here, bare token there) and the
//! split is deliberate, per dialect.

use crate::dialect::Dialect;
use crate::generator::{EmitContext, Fragment, GenResult};
use crate::yaml;

/// Build the xml dialect table.
pub fn dialect() -> Dialect {
    Dialect::new("xml", "  ", "<!-- Empty XML file -->")
        .rule("xml_tag", xml_tag)
        .rule("xml_attribute", xml_attribute)
        .rule("text", text)
        .rule("math_number", yaml::math_number)
        .rule("logic_boolean", yaml::logic_boolean)
}

/// `<name attrs/>`, or an open tag over indented children and a
/// mirrored closing tag. The closing name re-reads `TAG_NAME`, so a
/// rename reaches both ends.
fn xml_tag(ctx: &mut EmitContext) -> GenResult<Fragment> {
    let name = fallback(ctx.field_text("TAG_NAME"), "tag");
    let attributes = ctx.statement_code("ATTRIBUTES")?;
    let children = ctx.statement_code("CHILDREN")?;

    let mut open = format!("<{}", name);
    if !attributes.is_empty() {
        open.push(' ');
        open.push_str(&inline(&attributes));
    }

    if children.is_empty() {
        open.push_str("/>");
        Ok(Fragment::statement(open))
    } else {
        Ok(Fragment::statement(format!("{}>\n{}\n</{}>", open, children, name)))
    }
}

/// `name=value`; an empty value socket renders `""`.
fn xml_attribute(ctx: &mut EmitContext) -> GenResult<Fragment> {
    let name = fallback(ctx.field_text("ATTR_NAME"), "attribute");
    let value = match ctx.child_code("VALUE")? {
        Some((text, _)) if !text.is_empty() => text,
        _ => "\"\"".to_string(),
    };
    Ok(Fragment::statement(format!("{}={}", name, value)))
}

fn text(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::atomic(format!("'{}'", ctx.field_text("TEXT"))))
}

/// Attribute chains collapse onto the opening tag's line: every
/// chained row trimmed and joined with single spaces.
fn inline(attributes: &str) -> String {
    attributes
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn fallback(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

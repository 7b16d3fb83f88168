//! Dockerfile emission rules: one instruction line per kind.

use crate::dialect::Dialect;
use crate::generator::{EmitContext, Fragment, GenResult};

/// Build the dockerfile dialect table.
pub fn dialect() -> Dialect {
    Dialect::new("dockerfile", "  ", "# Empty Dockerfile")
        .rule("dockerfile_from", from)
        .rule("dockerfile_run", run)
        .rule("dockerfile_cmd", cmd)
        .rule("dockerfile_expose", expose)
        .rule("dockerfile_env", env)
        .rule("dockerfile_copy", copy)
        .rule("dockerfile_add", add)
        .rule("dockerfile_workdir", workdir)
        .rule("dockerfile_user", user)
        .rule("dockerfile_arg", arg)
        .rule("dockerfile_entrypoint", entrypoint)
        .rule("dockerfile_volume", volume)
        .rule("dockerfile_label", label)
}

fn from(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!("FROM {}", ctx.field_text("IMAGE"))))
}

fn run(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!("RUN {}", ctx.field_text("COMMAND"))))
}

fn cmd(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!("CMD {}", ctx.field_text("COMMAND"))))
}

fn expose(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!("EXPOSE {}", ctx.field_text("PORT"))))
}

fn env(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!(
        "ENV {}={}",
        ctx.field_text("KEY"),
        ctx.field_text("VALUE")
    )))
}

fn copy(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!(
        "COPY {} {}",
        ctx.field_text("SOURCE"),
        ctx.field_text("DEST")
    )))
}

fn add(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!(
        "ADD {} {}",
        ctx.field_text("SOURCE"),
        ctx.field_text("DEST")
    )))
}

fn workdir(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!("WORKDIR {}", ctx.field_text("DIR"))))
}

fn user(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!("USER {}", ctx.field_text("USER"))))
}

/// `ARG NAME=default`, or bare `ARG NAME` when no default is set.
fn arg(ctx: &mut EmitContext) -> GenResult<Fragment> {
    let name = ctx.field_text("NAME");
    let default = ctx.field_text("DEFAULT");
    if default.is_empty() {
        Ok(Fragment::statement(format!("ARG {}", name)))
    } else {
        Ok(Fragment::statement(format!("ARG {}={}", name, default)))
    }
}

fn entrypoint(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!(
        "ENTRYPOINT {}",
        ctx.field_text("COMMAND")
    )))
}

fn volume(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!(
        "VOLUME [\"{}\"]",
        ctx.field_text("PATH")
    )))
}

fn label(ctx: &mut EmitContext) -> GenResult<Fragment> {
    Ok(Fragment::statement(format!(
        "LABEL {}=\"{}\"",
        ctx.field_text("KEY"),
        ctx.field_text("VALUE")
    )))
}

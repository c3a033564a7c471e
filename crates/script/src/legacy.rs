//! Deprecated free functions kept for scripts written against the early
//! module-level API. Each one warns once per call, then delegates to the
//! context's output window.

use crate::ScriptContext;

#[deprecated(note = "use the output window: `ctx.output().print_md(..)`")]
pub fn print_md(ctx: &ScriptContext, markdown: &str) {
    log::warn!("module-level print_md is deprecated; use the context output window");
    ctx.output().print_md(markdown);
}

#[deprecated(note = "use the output window: `ctx.output().print_code(..)`")]
pub fn print_code(ctx: &ScriptContext, code: &str) {
    log::warn!("module-level print_code is deprecated; use the context output window");
    ctx.output().print_code(code);
}

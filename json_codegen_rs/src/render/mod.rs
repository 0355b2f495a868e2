//! Renderers: print a [`ResolvedModule`] as source text for one language.

mod flow;
mod javascript;
mod literal;
mod python2;

use std::io::Write;

use tracing::debug;

use crate::module::ResolvedModule;
use crate::settings::{GenerateSettings, Language};

/// Name a class is printed under. Class names in the module are already
/// identifiers; the prefix is the only thing left to apply.
fn class_name(prefix: &str, name: &str) -> String {
    format!("{prefix}{name}")
}

/// Write `module` to `writer` in the language `settings` selects. The output
/// ends with a single newline.
///
/// # Errors
///
/// Returns any error from `writer`.
pub fn render<W: Write>(
    module: &ResolvedModule,
    settings: &GenerateSettings,
    writer: &mut W,
) -> std::io::Result<()> {
    debug!(
        language = %settings.language,
        classes = module.classes.len(),
        "rendering module"
    );
    let prefix: &str = settings.prefix();
    match settings.language {
        Language::Python2 => python2::emit_module(module, prefix, writer),
        Language::JavaScript => {
            javascript::emit_module(module, prefix, javascript::Dialect::Plain, writer)
        }
        Language::Flow => javascript::emit_module(module, prefix, javascript::Dialect::Flow, writer),
    }
}

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::warn;

use flightnet_compiler::validate::validate_grammar;
use flightnet_ir::grammar::CycleGrammar;
use flightnet_ir::parse::parse_grammar;

/// Load the grammar from `path` (JSON) or use the built-in flight booking
/// cycle, then validate it.
///
/// Structural errors are fatal. Paths outside the invariant catalog are only
/// logged: the reducer reports the cycles they produce as defects.
pub fn load_grammar(path: Option<&Path>) -> Result<CycleGrammar> {
    let grammar = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading grammar {}", path.display()))?;
            parse_grammar(&json).with_context(|| format!("parsing grammar {}", path.display()))?
        }
        None => CycleGrammar::flight_booking(),
    };

    if let Err(errors) = validate_grammar(&grammar) {
        let (structural, paths): (Vec<_>, Vec<_>) =
            errors.into_iter().partition(|e| e.is_structural());
        for error in &paths {
            warn!(grammar = %grammar.name, "{error}");
        }
        if !structural.is_empty() {
            let messages: Vec<String> = structural.iter().map(ToString::to_string).collect();
            bail!("grammar '{}' is unusable: {}", grammar.name, messages.join("; "));
        }
    }
    Ok(grammar)
}

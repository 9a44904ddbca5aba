// routefix - core/awaited.rs
//
// Pure text transform turning a synchronous params destructure into its
// awaited form:
//
//   const { id } = params;      ->   const { id } = await params;
//
// Applied by the targeted pass to the fixed file list in util::constants.

use crate::core::model::Rewrite;
use regex::Regex;
use std::sync::OnceLock;

/// Matches an indented `const { … } = params;` statement. Already-awaited
/// lines do not match (`await ` sits between `= ` and `params;`), so the
/// substitution is idempotent.
fn sync_destructure_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\s+)(const \{ [^}]+ \} = )(params;)").expect("sync destructure pattern")
    })
}

/// Rewrite every synchronous params destructure in `content` to await the
/// params value. Lines that do not match the exact shape are untouched.
pub fn await_params(content: &str) -> Rewrite {
    let re = sync_destructure_re();
    let substitutions = re.find_iter(content).count();
    let content = re.replace_all(content, "${1}${2}await ${3}").into_owned();

    Rewrite {
        content,
        substitutions,
    }
}

// =============================================================================
// Tests
// =============================================================================

// routefix - core/duplicates.rs
//
// Pure text transform removing the redundant awaited destructure the
// signature pass leaves behind on handlers that already destructured
// `params` inside their `try` block: the injected copy sits directly above
// the `try {`, shadowed by the original inside it.
//
// The matching condition is deliberately narrow (substring tests on the
// line and its successor, nothing more); it exists to undo one known side
// effect, not to deduplicate code in general.

use crate::core::model::Rewrite;

/// Drop every line that both destructures from the awaited `params` value
/// and is immediately followed by the opening of a `try` block. All other
/// lines, including their original terminators, are preserved verbatim.
/// The final line of a file is never dropped (it has no successor).
pub fn strip_duplicate_awaits(content: &str) -> Rewrite {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let mut out = String::with_capacity(content.len());
    let mut removed = 0;

    for (i, line) in lines.iter().enumerate() {
        let is_awaited_destructure =
            line.contains("const {") && line.contains("} = await params;");
        let next_opens_try = lines.get(i + 1).is_some_and(|next| next.contains("try {"));

        if is_awaited_destructure && next_opens_try {
            removed += 1;
            continue;
        }
        out.push_str(line);
    }

    Rewrite {
        content: out,
        substitutions: removed,
    }
}

// =============================================================================
// Tests
// =============================================================================

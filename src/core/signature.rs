// routefix - core/signature.rs
//
// Pure text transform migrating a route handler file to the awaited
// route-parameter convention:
//
//   (a) `{ params }: { params: { id: string } }` becomes
//       `{ params }: { params: Promise<{ id: string }> }`.
//   (b) each HTTP method handler that destructures `{ params }` gets
//       `const { id } = await params;` injected immediately after its
//       opening brace, unless an `await params` already appears nearby.
//
// The transform is textual, not syntactic: it recognises the exact shapes
// the migrated codebase uses and leaves everything else byte-identical.

use crate::core::model::Rewrite;
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// Matches the synchronous params annotation:
/// `{ params }: { params: { id: string } }`. Already-wrapped annotations do
/// not match (the inner group requires a literal `{` after `params: `), so
/// the wrapping substitution is idempotent.
fn params_type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\{ params \}: \{ params: )(\{[^}]+\})( \})").expect("params type pattern")
    })
}

/// Matches the wrapped annotation inside a handler signature and captures
/// the field list of the inner object type.
fn promise_params_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{ params \}: \{ params: Promise<\{([^}]+)\}>").expect("promise params pattern")
    })
}

/// One compiled handler-signature matcher per HTTP method. The signature
/// must destructure `{ params }` somewhere in its parameter list and end at
/// the opening brace of the function body.
fn handler_res() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        constants::HTTP_METHODS
            .iter()
            .map(|method| {
                let pattern = format!(
                    r"export async function {method}\([^)]+\{{ params \}}[^)]*\)\s*\{{"
                );
                Regex::new(&pattern).expect("handler signature pattern")
            })
            .collect()
    })
}

/// Apply the full signature migration to one file's text.
///
/// Handlers whose `params` annotation is not the `Promise<{…}>` shape after
/// step (a) are left alone: the pattern does not match, no change. Matches
/// are processed in reverse order so insertions never invalidate the byte
/// offsets of earlier matches.
pub fn rewrite_route(content: &str) -> Rewrite {
    let mut substitutions = 0;

    // Step (a): wrap the annotation's object type in Promise<…>.
    let wrap_re = params_type_re();
    substitutions += wrap_re.find_iter(content).count();
    let mut text = wrap_re
        .replace_all(content, "${1}Promise<${2}>${3}")
        .into_owned();

    // Step (b): inject the awaited destructure into each handler body.
    for re in handler_res() {
        let matches: Vec<(usize, usize)> =
            re.find_iter(&text).map(|m| (m.start(), m.end())).collect();

        for &(start, end) in matches.iter().rev() {
            let signature = &text[start..end];
            let Some(caps) = promise_params_re().captures(signature) else {
                // Annotation is not the awaited shape; leave the handler alone.
                continue;
            };

            let names: Vec<&str> = caps[1]
                .split(',')
                .map(|field| field.split(':').next().unwrap_or("").trim())
                .collect();

            if already_awaits_params(&text, end) {
                continue;
            }

            let statement = format!("\n    const {{ {} }} = await params;", names.join(", "));
            text.insert_str(end, &statement);
            substitutions += 1;
        }
    }

    Rewrite {
        content: text,
        substitutions,
    }
}

/// True when `await params` already appears within the guard window after
/// the handler's opening brace at byte offset `brace_end`.
fn already_awaits_params(text: &str, brace_end: usize) -> bool {
    let mut window_end = (brace_end + constants::AWAIT_GUARD_WINDOW).min(text.len());
    while !text.is_char_boundary(window_end) {
        window_end -= 1;
    }
    text[brace_end..window_end].contains("await params")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SYNC_ROUTE: &str = "\
import { NextRequest, NextResponse } from 'next/server';
import { db } from '@/lib/db';

export async function GET(
  request: NextRequest,
  { params }: { params: { id: string } }
) {
  const item = await db.find(params.id);
  return NextResponse.json(item);
}
";

    #[test]
    fn test_wraps_params_type_in_promise() {
        let result = rewrite_route(SYNC_ROUTE);
        assert!(result
            .content
            .contains("{ params }: { params: Promise<{ id: string }> }"));
        assert!(!result.content.contains("params: { id: string } }"));
    }

    #[test]
    fn test_injects_awaited_destructure_after_brace() {
        let result = rewrite_route(SYNC_ROUTE);
        assert!(
            result.content.contains(") {\n    const { id } = await params;"),
            "awaited destructure must follow the opening brace:\n{}",
            result.content
        );
        assert_eq!(result.substitutions, 2, "one wrap + one injection");
    }

    #[test]
    fn test_idempotent_on_second_run() {
        let first = rewrite_route(SYNC_ROUTE);
        let second = rewrite_route(&first.content);
        assert_eq!(second.substitutions, 0);
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn test_surrounding_text_untouched() {
        let result = rewrite_route(SYNC_ROUTE);
        // Everything outside the matched annotation and the injected line is
        // byte-identical; spot-check the imports and the body.
        assert!(result
            .content
            .starts_with("import { NextRequest, NextResponse } from 'next/server';"));
        assert!(result.content.contains("const item = await db.find(params.id);"));
    }

    #[test]
    fn test_multiple_param_names() {
        let content = "\
export async function DELETE(
  request: Request,
  { params }: { params: { id: string, version: string } }
) {
  return new Response(null, { status: 204 });
}
";
        let result = rewrite_route(content);
        assert!(result
            .content
            .contains("const { id, version } = await params;"));
    }

    #[test]
    fn test_all_handlers_in_one_file_are_injected() {
        let content = "\
export async function GET(
  request: Request,
  { params }: { params: { slug: string } }
) {
  return handle(params);
}

export async function PUT(
  request: Request,
  { params }: { params: { slug: string } }
) {
  return handle(params);
}

export async function DELETE(
  request: Request,
  { params }: { params: { slug: string } }
) {
  return handle(params);
}
";
        let result = rewrite_route(content);
        let injected = result
            .content
            .matches("const { slug } = await params;")
            .count();
        assert_eq!(injected, 3, "every handler gets its own destructure");
        assert_eq!(result.substitutions, 6, "three wraps + three injections");
    }

    #[test]
    fn test_existing_await_within_window_suppresses_injection() {
        let content = "\
export async function GET(
  request: Request,
  { params }: { params: Promise<{ contentId: string }> }
) {
  try {
    const { contentId } = await params;
    return ok();
  } catch (error) {
    return fail();
  }
}
";
        let result = rewrite_route(content);
        assert_eq!(result.substitutions, 0);
        assert_eq!(result.content, content);
    }

    #[test]
    fn test_handler_without_promise_shape_is_skipped() {
        // POST handlers without dynamic segments take no params annotation;
        // nothing should be injected.
        let content = "\
export async function POST(request: Request) {
  const body = await request.json();
  return ok(body);
}
";
        let result = rewrite_route(content);
        assert_eq!(result.substitutions, 0);
        assert_eq!(result.content, content);
    }

    #[test]
    fn test_unrecognised_method_is_ignored() {
        let content = "\
export async function OPTIONS(
  request: Request,
  { params }: { params: { id: string } }
) {
  return ok();
}
";
        let result = rewrite_route(content);
        // The annotation is still wrapped (step a is method-agnostic), but
        // no destructure is injected for a method outside the handler list.
        assert!(result.content.contains("Promise<{ id: string }>"));
        assert!(!result.content.contains("await params;"));
        assert_eq!(result.substitutions, 1);
    }

    #[test]
    fn test_no_matching_pattern_returns_input_unchanged() {
        let content = "export const runtime = 'edge';\n";
        let result = rewrite_route(content);
        assert_eq!(result.content, content);
        assert_eq!(result.substitutions, 0);
    }
}

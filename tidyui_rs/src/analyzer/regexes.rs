use std::sync::OnceLock;

use regex::Regex;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

/// `export? default? const|function PascalName`
pub(crate) fn regex_component_decl() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r#"^\s*(?:export\s+)?(?:default\s+)?(?:const|function)\s+([A-Z][A-Za-z0-9]*)"#)
    })
}

/// Declarations that look like components but are not authored ones:
/// dynamic icon lookups, `.map`-produced elements, props interfaces.
pub(crate) fn regex_non_component_decls() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        vec![
            regex(r#"(?:const|let)\s+\w*Icon\w*\s*=\s*[\w.]+\["#),
            regex(r#"\.map\s*\("#),
            regex(r#"interface\s+\w+Props\b"#),
        ]
    })
}

pub(crate) fn regex_first_brace_group() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\{([^{}]*)\}"#))
}

pub(crate) fn regex_prop_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"^\s*(?:\.\.\.)?([A-Za-z_$][A-Za-z0-9_$]*)"#))
}

pub(crate) fn regex_hex_color() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"#(?:[0-9a-fA-F]{8}|[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b"#))
}

pub(crate) fn regex_rgb_color() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"rgba?\(\s*\d[^)]*\)"#))
}

/// `opacity: 0.5`, literal in group 1.
pub(crate) fn regex_opacity_literal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"(?i)\bopacity\s*:\s*(0?\.\d+)"#))
}

pub(crate) fn regex_pixel_literal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\b\d{2,}px\b"#))
}

/// `className="..."` or `className='...'`.
pub(crate) fn regex_class_name_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"className\s*=\s*(?:"([^"]*)"|'([^']*)')"#))
}

/// Tailwind colour-scale utilities: `bg-blue-500`, `text-gray-700`, `border-red-200`.
pub(crate) fn regex_color_scale_utility() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"^(bg|text|border)-[a-z]+-[1-9]00$"#))
}

pub(crate) fn regex_markup_segment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"<[^<>]+>"#))
}

pub(crate) fn regex_module_keyword() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\b(?:import|export)\b"#))
}

pub(crate) fn regex_whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\s+"#))
}

pub(crate) fn regex_class_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"className\s*=\s*(?:"[^"]*"|'[^']*')"#))
}

pub(crate) fn regex_brace_expr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\{[^{}]*\}"#))
}

/// `item1`, `row_12`: identifiers carrying a numeric suffix.
pub(crate) fn regex_indexed_ident() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\b[A-Za-z_][A-Za-z_]*\d+\b"#))
}

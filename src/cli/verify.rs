use crate::{convert_config, MigrationOptions};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Cursor, Read, Write};
use xmltree::{Element, XMLNode};

use super::VerifyArgs;

pub(crate) fn run_verify(args: VerifyArgs) -> Result<()> {
    let mut file = File::open(&args.r#in)
        .with_context(|| format!("Failed to open input file: {}", args.r#in.display()))?;
    let mut input_buf = Vec::new();
    file.read_to_end(&mut input_buf)
        .with_context(|| format!("Failed to read input file: {}", args.r#in.display()))?;

    let options = MigrationOptions {
        fail_if_existing: args.fail_if_existing,
        verbose: args.verbose,
    };

    let mut output_buf = Vec::new();
    let _summary = convert_config(Cursor::new(&input_buf), &mut output_buf, &options)?;

    let input_str = normalize_xml(&input_buf)
        .with_context(|| format!("Failed to normalize input: {}", args.r#in.display()))?;
    let output_str = normalize_xml(&output_buf).context("Failed to normalize converted output")?;

    if input_str == output_str {
        if !args.quiet {
            println!("No changes.");
        }
        return Ok(());
    }

    if !args.quiet {
        let diff = similar::TextDiff::from_lines(&input_str, &output_str);
        let mut out = io::stdout().lock();
        let unified = diff
            .unified_diff()
            .context_radius(3)
            .header("original", "converted")
            .to_string();
        write!(out, "{}", unified)?;
    }

    Err(anyhow::anyhow!("verify: changes detected"))
}

/// Re-serialize a document in a canonical form (sorted attributes, fixed
/// indentation, no insignificant whitespace) so the diff only shows real
/// structural changes.
fn normalize_xml(input: &[u8]) -> Result<String> {
    let root = Element::parse(Cursor::new(input)).context("Failed to parse XML")?;
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_element(&root, 0, &mut out);
    Ok(out)
}

fn write_element(el: &Element, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    let _ = write!(out, "{}<{}", pad, el.name);

    let mut attrs: Vec<_> = el.attributes.iter().collect();
    attrs.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in attrs {
        let _ = write!(out, " {}=\"{}\"", key, escape_xml(value));
    }

    let children: Vec<&XMLNode> = el
        .children
        .iter()
        .filter(|node| match node {
            XMLNode::Text(text) => !text.trim().is_empty(),
            _ => true,
        })
        .collect();

    if children.is_empty() {
        out.push_str(" />\n");
        return;
    }

    // text-only elements stay on one line
    if children.len() == 1 {
        if let XMLNode::Text(text) = children[0] {
            let _ = writeln!(out, ">{}</{}>", escape_xml(text.trim()), el.name);
            return;
        }
    }

    out.push_str(">\n");
    for child in children {
        match child {
            XMLNode::Element(child_el) => write_element(child_el, indent + 2, out),
            XMLNode::Text(text) => {
                let _ = writeln!(out, "{}  {}", pad, escape_xml(text.trim()));
            }
            XMLNode::CData(data) => {
                let _ = writeln!(out, "{}  <![CDATA[{}]]>", pad, data);
            }
            XMLNode::Comment(comment) => {
                let _ = writeln!(out, "{}  <!--{}-->", pad, comment);
            }
            XMLNode::ProcessingInstruction(pi, data) => match data {
                Some(data) => {
                    let _ = writeln!(out, "{}  <?{} {}?>", pad, pi, data);
                }
                None => {
                    let _ = writeln!(out, "{}  <?{}?>", pad, pi);
                }
            },
        }
    }
    let _ = writeln!(out, "{}</{}>", pad, el.name);
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

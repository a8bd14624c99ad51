//! List command: show what transforms, groups and formats are available

use std::process::ExitCode;

use super::EXIT_SUCCESS;
use crate::formats::FormatRegistry;
use crate::registry::Registry;
use crate::transforms::TransformRegistry;

/// Human-readable listing of both registries.
fn listing(transforms: &TransformRegistry, formats: &FormatRegistry) -> String {
    let mut out = String::from("Transforms:\n");
    for name in transforms.sorted_names() {
        if let Some(transform) = transforms.get(&name) {
            let transitive = if transform.transitive { ", transitive" } else { "" };
            out.push_str(&format!("  {:<22} {}{}\n", name, transform.kind(), transitive));
        }
    }

    out.push_str("\nTransform groups:\n");
    for name in transforms.group_names() {
        let members = transforms.group(&name).unwrap_or_default();
        out.push_str(&format!("  {:<8} {}\n", name, members.join(", ")));
    }

    out.push_str("\nFormats:\n");
    for name in formats.sorted_names() {
        if let Some(format) = formats.get(&name) {
            out.push_str(&format!("  {:<30} .{}\n", name, format.extension()));
        }
    }
    out
}

/// Run the list command
pub fn run_list() -> ExitCode {
    print!("{}", listing(&TransformRegistry::with_builtins(), &FormatRegistry::with_builtins()));
    ExitCode::from(EXIT_SUCCESS)
}

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use walkdir::WalkDir;

use crate::models::LineCountReport;
use crate::scan::classifier::{classify, LineKind};

/// File extensions included in line counts. Files with any other
/// extension are skipped entirely and contribute to no counter.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["java", "py", "js", "rs", "css", "html"];

/// Walk `root` recursively and tally line counts over every supported file.
///
/// The walk covers everything under `root`, version-control metadata
/// included. Per-file failures never abort the scan: a file that is not
/// valid UTF-8 is skipped silently, any other read error is logged and
/// skipped.
pub fn scan_directory(root: &Path) -> LineCountReport {
    let mut report = LineCountReport::default();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let ext = match entry.path().extension().and_then(|e| e.to_str()) {
            Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext) => ext.to_string(),
            _ => continue,
        };

        let contents = match fs::read_to_string(entry.path()) {
            Ok(contents) => contents,
            // Not decodable as text; ignore the file.
            Err(err) if err.kind() == ErrorKind::InvalidData => continue,
            Err(err) => {
                tracing::warn!("Error reading file {}: {}", entry.path().display(), err);
                continue;
            }
        };

        tally_file(&mut report, &ext, &contents);
    }

    report
}

fn tally_file(report: &mut LineCountReport, ext: &str, contents: &str) {
    for line in contents.lines() {
        report.total_lines += 1;
        match classify(line) {
            LineKind::Blank => report.blank_lines += 1,
            LineKind::Comment => report.comment_lines += 1,
            LineKind::Code => {
                report.code_lines += 1;
                match ext {
                    "java" => report.java_lines += 1,
                    "py" => report.python_lines += 1,
                    "js" => report.javascript_lines += 1,
                    "rs" => report.rust_lines += 1,
                    "css" => report.css_lines += 1,
                    "html" => report.html_lines += 1,
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn counts_single_python_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x.py"), "\n# hi\nprint(1)\n").unwrap();

        let report = scan_directory(dir.path());
        assert_eq!(report.total_lines, 3);
        assert_eq!(report.blank_lines, 1);
        assert_eq!(report.comment_lines, 1);
        assert_eq!(report.code_lines, 1);
        assert_eq!(report.python_lines, 1);
    }

    #[test]
    fn unsupported_extensions_change_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "line\n".repeat(100)).unwrap();

        assert_eq!(scan_directory(dir.path()), LineCountReport::default());
    }

    #[test]
    fn totals_balance_across_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(
            dir.path().join("main.rs"),
            "// entry point\nfn main() {\n    println!(\"hi\");\n}\n\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("sub").join("page.html"),
            "<!-- header -->\n<html>\n</html>\n",
        )
        .unwrap();
        fs::write(dir.path().join("style.css"), "body { color: red; }\n").unwrap();

        let report = scan_directory(dir.path());
        assert_eq!(
            report.total_lines,
            report.blank_lines + report.comment_lines + report.code_lines
        );
        let per_ext = report.java_lines
            + report.python_lines
            + report.javascript_lines
            + report.rust_lines
            + report.css_lines
            + report.html_lines;
        assert_eq!(per_ext, report.code_lines);
        assert_eq!(report.rust_lines, 3);
        assert_eq!(report.html_lines, 2);
        assert_eq!(report.css_lines, 1);
    }

    #[test]
    fn undecodable_file_is_skipped_silently() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.rs"), [0xff, 0xfe, 0x00, 0x41]).unwrap();
        fs::write(dir.path().join("ok.rs"), "fn f() {}\n").unwrap();

        let report = scan_directory(dir.path());
        assert_eq!(report.total_lines, 1);
        assert_eq!(report.rust_lines, 1);
    }
}

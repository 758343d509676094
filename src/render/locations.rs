//! Fragment location report.

use std::fs;
use std::path::Path;

use crate::error::{BlendError, Result};
use crate::fragments::FragmentSet;
use crate::plan::{Grid, Plan};
use crate::progress::Progress;

/// Records between progress log lines.
pub const LOG_EVERY: usize = 720;

/// Build the location report for a plan.
///
/// Records are listed X-major: every row of column 0, then column 1, and so
/// on. Downstream tools parse the report in that order.
pub fn frag_locations_text(plan: &Plan, fragments: &FragmentSet) -> String {
    let total = plan.width() * plan.height();
    let progress = Progress::new("Recorded fragment locations block", total, LOG_EVERY);

    tracing::info!("Started recording fragment locations");
    let records = Grid::from_fn(plan.width(), plan.height(), |x, y| {
        let (index, flip, _) = plan.cell(x, y);
        let path = fragments.paths()[index].display().to_string();
        let record = format!(
            "- Fragment\n\n(X, Y): ({}, {})\nImage: \"{}\"\nFlip: \"{}\"\n\n- End of fragment\n",
            x,
            y,
            path.escape_debug(),
            flip
        );
        progress.tick();
        record
    });

    let mut text = String::new();
    for x in 0..records.width() {
        for y in 0..records.height() {
            text.push_str(&records[(x, y)]);
        }
    }
    tracing::debug!("Fragment locations: {}", text);
    tracing::info!("Completed recording fragment locations");

    text
}

/// Write the report to `path`.
pub fn write_frag_locations(text: &str, path: &Path) -> Result<()> {
    fs::write(path, text).map_err(|e| BlendError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write fragment locations: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RandomPolicy;
    use image::{Rgb, RgbImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn fragments(dir: &Path, count: usize) -> FragmentSet {
        for i in 0..count {
            RgbImage::from_pixel(2, 2, Rgb([i as u8, 0, 0]))
                .save(dir.join(format!("f{}.png", i)))
                .unwrap();
        }
        FragmentSet::scan(dir).unwrap()
    }

    #[test]
    fn test_records_are_column_major() {
        let dir = tempdir().unwrap();
        let set = fragments(dir.path(), 3);
        let plan = Plan::build(2, 2, 3, &RandomPolicy::default(), &mut StdRng::seed_from_u64(0));

        let text = frag_locations_text(&plan, &set);
        let positions: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with("(X, Y)"))
            .collect();

        assert_eq!(
            positions,
            vec![
                "(X, Y): (0, 0)",
                "(X, Y): (0, 1)",
                "(X, Y): (1, 0)",
                "(X, Y): (1, 1)",
            ]
        );
    }

    #[test]
    fn test_record_format() {
        let dir = tempdir().unwrap();
        let set = fragments(dir.path(), 1);
        let plan = Plan::build(1, 1, 1, &RandomPolicy::default(), &mut StdRng::seed_from_u64(0));

        let text = frag_locations_text(&plan, &set);
        let text = text.replace(&dir.path().display().to_string(), "<frags>");

        insta::assert_snapshot!(text.trim_end(), @r###"
        - Fragment

        (X, Y): (0, 0)
        Image: "<frags>/f0.png"
        Flip: ""

        - End of fragment
        "###);
    }

    #[test]
    fn test_write_frag_locations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locs.txt");
        write_frag_locations("- Fragment\n", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "- Fragment\n");
    }
}

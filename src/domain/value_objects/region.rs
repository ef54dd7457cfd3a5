//! Marked region kinds
//!
//! A marked region is a span of a generated file owned by the binding
//! generator. Each kind has its own tag token so regions can be located
//! independently; the surrounding banner lines are shared and must be
//! reproduced byte for byte because the generator searches for them.

use std::fmt;

use serde::Serialize;

/// Banner line opening every marker frame (without comment prefix)
pub const BANNER_OPEN: &str =
    "!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!  AUTOGENERATED CODE !!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!";

/// Banner line closing every marker frame (without comment prefix)
pub const BANNER_CLOSE: &str =
    "!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!  AUTOGENERATED CODE END !!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!";

/// The three regions the generator knows how to fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// Helper code emitted before the module init function (C++)
    GlueCode,
    /// `m.def(...)` statements inside the module init function (C++)
    Pydef,
    /// Python type stub declarations
    Stub,
}

impl RegionKind {
    pub const ALL: [RegionKind; 3] = [RegionKind::GlueCode, RegionKind::Pydef, RegionKind::Stub];

    /// Tag name between the angle brackets
    pub fn token(&self) -> &'static str {
        match self {
            RegionKind::GlueCode => "litgen_glue_code",
            RegionKind::Pydef => "litgen_pydef",
            RegionKind::Stub => "litgen_stub",
        }
    }

    /// Line comment prefix of the file this region lives in
    pub fn comment_prefix(&self) -> &'static str {
        match self {
            RegionKind::GlueCode | RegionKind::Pydef => "//",
            RegionKind::Stub => "#",
        }
    }

    /// `<token>`
    pub fn begin_tag(&self) -> String {
        format!("<{}>", self.token())
    }

    /// `</token>`
    pub fn end_tag(&self) -> String {
        format!("</{}>", self.token())
    }

    /// Full begin tag line, including newline
    pub fn begin_line(&self) -> String {
        format!(
            "{} {}  // Autogenerated code below! Do not edit!\n",
            self.comment_prefix(),
            self.begin_tag()
        )
    }

    /// Full end tag line, including newline
    pub fn end_line(&self) -> String {
        format!(
            "{} {} // Autogenerated code end\n",
            self.comment_prefix(),
            self.end_tag()
        )
    }

    /// Everything written before the region body: banner + begin tag line.
    pub fn frame_open(&self) -> String {
        format!("{} {}\n{}", self.comment_prefix(), BANNER_OPEN, self.begin_line())
    }

    /// Everything written after the region body: end tag line + banner + blank line.
    pub fn frame_close(&self) -> String {
        format!("{}{} {}\n\n", self.end_line(), self.comment_prefix(), BANNER_CLOSE)
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glue_frame_matches_generator_format() {
        let frame = format!(
            "{}{}",
            RegionKind::GlueCode.frame_open(),
            RegionKind::GlueCode.frame_close()
        );
        let expected = concat!(
            "// !!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!  AUTOGENERATED CODE !!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!\n",
            "// <litgen_glue_code>  // Autogenerated code below! Do not edit!\n",
            "// </litgen_glue_code> // Autogenerated code end\n",
            "// !!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!  AUTOGENERATED CODE END !!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!\n",
            "\n",
        );
        assert_eq!(frame, expected);
    }

    #[test]
    fn stub_frame_uses_hash_comments() {
        let open = RegionKind::Stub.frame_open();
        assert!(open.starts_with("# !!!"));
        assert!(open.ends_with("# <litgen_stub>  // Autogenerated code below! Do not edit!\n"));
        assert_eq!(
            RegionKind::Stub.end_line(),
            "# </litgen_stub> // Autogenerated code end\n"
        );
    }

    #[test]
    fn tags_are_distinct() {
        for a in RegionKind::ALL {
            for b in RegionKind::ALL {
                if a != b {
                    assert!(!a.begin_tag().contains(&b.begin_tag()));
                    assert!(!a.end_tag().contains(&b.end_tag()));
                }
            }
            assert!(!a.end_tag().contains(&a.begin_tag()));
        }
    }
}

use std::fmt;

// @module: LaTeX sectioning levels

/// A sectioning command, from `\part` down to `\subparagraph`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionLevel {
    Part,
    Chapter,
    Section,
    Subsection,
    Subsubsection,
    Paragraph,
    Subparagraph,
}

impl SectionLevel {
    /// Every level, outermost first
    pub const ALL: [SectionLevel; 7] = [
        SectionLevel::Part,
        SectionLevel::Chapter,
        SectionLevel::Section,
        SectionLevel::Subsection,
        SectionLevel::Subsubsection,
        SectionLevel::Paragraph,
        SectionLevel::Subparagraph,
    ];

    // @returns: Command name without the backslash
    pub fn command(&self) -> &'static str {
        match self {
            Self::Part => "part",
            Self::Chapter => "chapter",
            Self::Section => "section",
            Self::Subsection => "subsection",
            Self::Subsubsection => "subsubsection",
            Self::Paragraph => "paragraph",
            Self::Subparagraph => "subparagraph",
        }
    }

    // @returns: Level for an exact command name
    pub fn from_command(name: &str) -> Option<Self> {
        let name = name.trim_start_matches('\\');
        Self::ALL.iter().copied().find(|level| level.command() == name)
    }
}

impl fmt::Display for SectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\{}", self.command())
    }
}

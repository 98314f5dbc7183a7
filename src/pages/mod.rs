//! Static page catalog shown by the kiosk.
//!
//! Pages are a fixed, ordered list. Each page is a vertical stack of
//! [`Section`]s; the UI lays them out top to bottom and scrolls the stack.

/// One of the kiosk's pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Admissions,
    Departments,
    Placements,
}

/// Navigation order of every page.
pub const PAGES: [Page; 4] = [
    Page::Home,
    Page::Admissions,
    Page::Departments,
    Page::Placements,
];

/// Brand shown at the left of the navigation bar.
pub const BRAND: &str = "RVCE CampusConnect";

/// A block of page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Page heading followed by a blank row.
    Heading(String),
    /// Bordered box with an optional title.
    Panel {
        title: Option<String>,
        lines: Vec<String>,
    },
    /// Single data row.
    Row(String),
    /// Blank rows, used to give short pages room to scroll.
    Spacer(u16),
}

impl Section {
    /// Height of the section in terminal rows.
    pub fn height(&self) -> u16 {
        match self {
            Self::Heading(_) => 2,
            Self::Panel { lines, .. } => u16::try_from(lines.len())
                .unwrap_or(u16::MAX)
                .saturating_add(2),
            Self::Row(_) => 1,
            Self::Spacer(rows) => *rows,
        }
    }

    /// Whether pointing at this section counts as hovering an element.
    pub const fn is_interactive(&self) -> bool {
        !matches!(self, Self::Spacer(_))
    }
}

impl Page {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Admissions => "Admissions",
            Self::Departments => "Departments",
            Self::Placements => "Placements",
        }
    }

    /// Position of this page in [`PAGES`].
    pub fn index(self) -> usize {
        PAGES.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// Look a page up by its title, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        PAGES
            .iter()
            .copied()
            .find(|p| p.title().eq_ignore_ascii_case(name))
    }

    /// Content of the page, top to bottom.
    pub fn sections(self) -> Vec<Section> {
        match self {
            Self::Home => vec![
                Section::Panel {
                    title: None,
                    lines: vec![
                        "Welcome to RVCE Campus Kiosk".to_string(),
                        "Navigate, explore and interact using simple hand gestures.".to_string(),
                    ],
                },
                Section::Panel {
                    title: Some("Features".to_string()),
                    lines: vec![
                        "• Gesture-based navigation".to_string(),
                        "• Contactless touch interactions".to_string(),
                        "• Smooth scrolling and auto-click".to_string(),
                    ],
                },
                Section::Spacer(40),
            ],
            Self::Admissions => {
                let mut sections = vec![Section::Heading("Admissions Dashboard".to_string())];
                sections.extend((0..20).map(|i| {
                    Section::Row(format!(
                        "Application ID: RV2025_{} | Status: Verified",
                        i + 100
                    ))
                }));
                sections
            }
            Self::Departments => {
                let mut sections = vec![Section::Heading("Departments".to_string())];
                sections.extend(
                    [
                        "Computer Science & Engineering",
                        "Electronics & Communication",
                        "Mechanical Engineering",
                        "AI & Machine Learning",
                    ]
                    .into_iter()
                    .map(|name| Section::Panel {
                        title: None,
                        lines: vec![name.to_string()],
                    }),
                );
                sections
            }
            Self::Placements => vec![
                Section::Heading("Placement Highlights".to_string()),
                Section::Panel {
                    title: Some("2024 Highest Package".to_string()),
                    lines: vec!["₹54 LPA".to_string()],
                },
                Section::Panel {
                    title: Some("Top Recruiters".to_string()),
                    lines: vec!["Google, Amazon, Microsoft, Infosys, TCS".to_string()],
                },
            ],
        }
    }

    /// Total height of the page content in rows.
    pub fn content_rows(self) -> usize {
        self.sections()
            .iter()
            .map(|s| usize::from(s.height()))
            .sum()
    }
}

#![forbid(unsafe_code)]

//! Portfolio project catalog.
//!
//! The catalog is compiled into the binary and never mutated. Tab order is
//! significant: it is the render order of the tab bar, and the first tab is
//! the one shown when a project page opens.

/// One portfolio project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    /// Key used in the `id` query parameter.
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    /// Tabs in display order.
    pub tabs: &'static [Tab],
}

impl Project {
    /// Tab with the given key.
    pub fn tab(&self, key: &str) -> Option<&'static Tab> {
        self.tabs.iter().find(|tab| tab.key == key)
    }

    /// The tab shown when the project page opens.
    pub fn first_tab(&self) -> Option<&'static Tab> {
        self.tabs.first()
    }

    /// Images of the tab with the given key; empty for unknown keys.
    pub fn images(&self, key: &str) -> &'static [&'static str] {
        self.tab(key).map(|tab| tab.images).unwrap_or(&[])
    }
}

/// A named, ordered subset of a project's images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tab {
    pub key: &'static str,
    pub images: &'static [&'static str],
}

/// Read-only mapping from project id to [`Project`].
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    projects: &'static [Project],
}

impl Catalog {
    /// The site's built-in catalog.
    pub const fn builtin() -> Self {
        Self { projects: PROJECTS }
    }

    /// Catalog over an arbitrary static table.
    pub const fn from_static(projects: &'static [Project]) -> Self {
        Self { projects }
    }

    /// Project with the given id.
    pub fn get(&self, id: &str) -> Option<&'static Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// All projects in table order.
    pub fn iter(&self) -> std::slice::Iter<'static, Project> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

static PROJECTS: &[Project] = &[
    Project {
        id: "ajay-sweety",
        title: "Ajay weds Sweety",
        category: "Wedding Photography",
        tabs: &[
            Tab {
                key: "engagement",
                images: &[
                    "images/portfolio-item-5.jpg",
                    "images/portfolio-item-11.jpg",
                    "images/portfolio-item-12.jpg",
                    "images/portfolio-item-7.jpg",
                ],
            },
            Tab {
                key: "pre-wedding",
                images: &[
                    "images/portfolio-item-3.jpg",
                    "images/portfolio-user-2.jpg",
                    "images/portfolio-item-4.jpg",
                    "images/client-anita-rohan.png",
                ],
            },
            Tab {
                key: "sangeet",
                images: &[
                    "images/portfolio-item-9.jpg",
                    "images/portfolio-user-1.jpg",
                    "images/recent-1.jpg",
                ],
            },
            Tab {
                key: "marriage",
                images: &[
                    "images/portfolio-user-1.jpg",
                    "images/portfolio-item-5.jpg",
                    "images/portfolio-item-8.jpg",
                    "images/client-sita-ram.png",
                ],
            },
            Tab {
                key: "reception",
                images: &[
                    "images/portfolio-item-8.jpg",
                    "images/portfolio-item-10.jpg",
                    "images/recent-2.jpg",
                ],
            },
            Tab {
                key: "highlights",
                images: &[
                    "images/portfolio-user-1.jpg",
                    "images/portfolio-item-12.jpg",
                    "images/hero-bg.jpg",
                ],
            },
            // Video placeholders pending.
            Tab {
                key: "videos",
                images: &[],
            },
        ],
    },
    Project {
        id: "rohan-meera",
        title: "Rohan & Meera",
        category: "Pre-Wedding Shoot",
        tabs: &[
            Tab {
                key: "engagement",
                images: &[],
            },
            Tab {
                key: "pre-wedding",
                images: &["images/portfolio-item-3.jpg", "images/portfolio-item-4.jpg"],
            },
            Tab {
                key: "sangeet",
                images: &[],
            },
            Tab {
                key: "marriage",
                images: &[],
            },
            Tab {
                key: "reception",
                images: &[],
            },
            Tab {
                key: "highlights",
                images: &["images/portfolio-item-3.jpg"],
            },
            Tab {
                key: "videos",
                images: &[],
            },
        ],
    },
    Project {
        id: "anniversary-70",
        title: "70th Wedding Anniversary",
        category: "Event Photography",
        tabs: &[
            Tab {
                key: "father-mother-70-years",
                images: &[
                    "images/70th-anniversary/221A1912.jpg",
                    "images/70th-anniversary/221A1926.jpg",
                    "images/70th-anniversary/221A1946.jpg",
                    "images/70th-anniversary/221A1955.jpg",
                    "images/70th-anniversary/221A1961.jpg",
                    "images/70th-anniversary/221A1965.jpg",
                    "images/70th-anniversary/221A1968.jpg",
                    "images/70th-anniversary/221A2011.jpg",
                    "images/70th-anniversary/221A2024.jpg",
                    "images/70th-anniversary/221A2119.jpg",
                    "images/70th-anniversary/221A2134.jpg",
                    "images/70th-anniversary/221A2140.jpg",
                    "images/70th-anniversary/221A2141.jpg",
                    "images/70th-anniversary/NNK04293.jpg",
                    "images/70th-anniversary/NNK04297.jpg",
                    "images/70th-anniversary/NNK04304%202.jpg",
                    "images/70th-anniversary/NNK04304.jpg",
                    "images/70th-anniversary/NNK04317%202.jpg",
                    "images/70th-anniversary/NNK04317.jpg",
                    "images/70th-anniversary/NNK04331%202.jpg",
                    "images/70th-anniversary/NNK04331.jpg",
                    "images/70th-anniversary/NNK04357%202.jpg",
                    "images/70th-anniversary/NNK04357.jpg",
                    "images/70th-anniversary/NNK04359.jpg",
                    "images/70th-anniversary/NNK04365.jpg",
                ],
            },
            Tab {
                key: "sons-and-grandchildren",
                images: &[
                    "images/70th-anniversary/221A2181.jpg",
                    "images/70th-anniversary/221A2194.jpg",
                    "images/70th-anniversary/221A2196.jpg",
                    "images/70th-anniversary/221A2241.jpg",
                    "images/70th-anniversary/221A2242.jpg",
                    "images/70th-anniversary/221A2245.jpg",
                    "images/70th-anniversary/221A2264.jpg",
                    "images/70th-anniversary/221A2274.jpg",
                    "images/70th-anniversary/NNK04392.jpg",
                    "images/70th-anniversary/NNK04399.jpg",
                    "images/70th-anniversary/NNK04403.jpg",
                    "images/70th-anniversary/NNK04416.jpg",
                    "images/70th-anniversary/NNK04474.jpg",
                    "images/70th-anniversary/NNK04478.jpg",
                    "images/70th-anniversary/NNK04480.jpg",
                    "images/70th-anniversary/NNK04484.jpg",
                    "images/70th-anniversary/NNK04518.jpg",
                    "images/70th-anniversary/NNK04530.jpg",
                    "images/70th-anniversary/NNK04542.jpg",
                    "images/70th-anniversary/NNK04551.jpg",
                ],
            },
            Tab {
                key: "sons-photoshoot",
                images: &[
                    "images/70th-anniversary/221A2359.jpg",
                    "images/70th-anniversary/221A2383.jpg",
                    "images/70th-anniversary/221A2389.jpg",
                    "images/70th-anniversary/NNK04561.jpg",
                    "images/70th-anniversary/NNK04579.jpg",
                    "images/70th-anniversary/NNK04601.jpg",
                    "images/70th-anniversary/NNK04602.jpg",
                    "images/70th-anniversary/NNK04621.jpg",
                    "images/70th-anniversary/NNK04623.jpg",
                    "images/70th-anniversary/NNK04638.jpg",
                    "images/70th-anniversary/NNK04639.jpg",
                    "images/70th-anniversary/NNK04651.jpg",
                    "images/70th-anniversary/NNK04658.jpg",
                ],
            },
        ],
    },
];

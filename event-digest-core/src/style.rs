//! Category styling: icon and color per recognized category.

use crate::contract::DEFAULT_CATEGORY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStyle {
    pub icon: String,
    pub color: String,
}

impl CategoryStyle {
    pub fn new(icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            color: color.into(),
        }
    }
}

/// Immutable lookup from uppercased category to its style.
///
/// Categories without an entry use the fallback style.
#[derive(Debug, Clone)]
pub struct StyleTable {
    entries: Vec<(String, CategoryStyle)>,
    fallback: CategoryStyle,
}

impl StyleTable {
    pub fn new(fallback: CategoryStyle) -> Self {
        Self {
            entries: Vec::new(),
            fallback,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>, style: CategoryStyle) -> Self {
        self.entries.push((category.into(), style));
        self
    }

    pub fn style_for(&self, category: &str) -> &CategoryStyle {
        self.entries
            .iter()
            .find(|(key, _)| key == category)
            .map(|(_, style)| style)
            .unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &CategoryStyle {
        &self.fallback
    }

    pub fn icons(&self) -> CategoryLookup<'_> {
        CategoryLookup {
            table: self,
            pick: icon_of,
        }
    }

    pub fn colors(&self) -> CategoryLookup<'_> {
        CategoryLookup {
            table: self,
            pick: color_of,
        }
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        let other = CategoryStyle::new("📌", "#3498db");
        StyleTable::new(other.clone())
            .with_category("MOVIE", CategoryStyle::new("🎬", "#f39c12"))
            .with_category("GAME", CategoryStyle::new("🎮", "#27ae60"))
            .with_category("MUSIC", CategoryStyle::new("🎵", "#9235ba"))
            .with_category(DEFAULT_CATEGORY, other)
    }
}

/// Single-attribute view of a [`StyleTable`], handed to templates as `icons`
/// or `category_colors`.
#[derive(Clone, Copy)]
pub struct CategoryLookup<'a> {
    table: &'a StyleTable,
    pick: fn(&CategoryStyle) -> &str,
}

impl<'a> CategoryLookup<'a> {
    pub fn get(&self, category: &str) -> &'a str {
        (self.pick)(self.table.style_for(category))
    }
}

fn icon_of(style: &CategoryStyle) -> &str {
    &style.icon
}

fn color_of(style: &CategoryStyle) -> &str {
    &style.color
}

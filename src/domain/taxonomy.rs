use std::sync::LazyLock;

/// Canonical change categories and the keywords that identify them.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub name: &'static str,
    pub synonyms: &'static [&'static str],
}

static BUILTIN: LazyLock<Taxonomy> = LazyLock::new(|| {
    Taxonomy::new(vec![
        Category {
            name: "bug",
            synonyms: &["bug", "fix", "bugfix"],
        },
        Category {
            name: "feature",
            synonyms: &["feature", "enhancement", "new"],
        },
        Category {
            name: "docs",
            synonyms: &["doc", "docs", "documentation"],
        },
        Category {
            name: "refactor",
            synonyms: &["refactor", "cleanup"],
        },
        Category {
            name: "test",
            synonyms: &["test", "tests"],
        },
        Category {
            name: "performance",
            synonyms: &["performance", "speed", "optimization", "optimize"],
        },
        Category {
            name: "security",
            synonyms: &["security", "secure", "vulnerability", "auth", "encryption"],
        },
    ])
});

impl Taxonomy {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The process-wide keyword table.
    pub fn builtin() -> &'static Taxonomy {
        &BUILTIN
    }

    /// Synonyms of a canonical category. `label` must already be lower-case.
    pub fn lookup(&self, label: &str) -> Option<&'static [&'static str]> {
        self.categories
            .iter()
            .find(|category| category.name == label)
            .map(|category| category.synonyms)
    }

    /// Keywords to search for: the category's synonyms, or the label itself
    /// when it names no category.
    pub fn search_terms<'a>(&self, label: &'a str) -> Vec<&'a str> {
        match self.lookup(label) {
            Some(synonyms) => synonyms.to_vec(),
            None => vec![label],
        }
    }
}

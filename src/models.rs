use crate::date_key::DateKey;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Protein,
    Fruits,
    Vegetables,
    Carbs,
    Dairy,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Protein,
        Category::Fruits,
        Category::Vegetables,
        Category::Carbs,
        Category::Dairy,
    ];

    /// Number of boxes a fresh day starts with.
    pub const fn default_quota(self) -> usize {
        match self {
            Category::Protein => 8,
            Category::Fruits => 3,
            Category::Vegetables => 3,
            Category::Carbs => 2,
            Category::Dairy => 1,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Category::Protein => "Protein",
            Category::Fruits => "Fruits",
            Category::Vegetables => "Vegetables",
            Category::Carbs => "Carbs",
            Category::Dairy => "Dairy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Sum of all default quotas, the denominator of every weekly percentage.
pub const TOTAL_DEFAULT_QUOTA: usize = {
    let mut total = 0;
    let mut i = 0;
    while i < Category::ALL.len() {
        total += Category::ALL[i].default_quota();
        i += 1;
    }
    total
};

/// Checkbox state of one category for one day.
///
/// `checked.len()` is the box count; the first `default_quota` boxes are the
/// default boxes, everything after them was added by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    checked: Vec<bool>,
}

impl CategoryEntry {
    pub fn fresh(category: Category) -> Self {
        Self {
            checked: vec![false; category.default_quota()],
        }
    }

    pub fn box_count(&self) -> usize {
        self.checked.len()
    }

    pub fn checked(&self) -> &[bool] {
        &self.checked
    }

    pub fn add_box(&mut self) {
        self.checked.push(false);
    }

    /// Flips box `index` and returns its new state, `None` if out of range.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let slot = self.checked.get_mut(index)?;
        *slot = !*slot;
        Some(*slot)
    }

    pub fn default_checked(&self, category: Category) -> usize {
        let quota = category.default_quota().min(self.checked.len());
        self.checked[..quota].iter().filter(|c| **c).count()
    }

    pub fn extra_checked(&self, category: Category) -> usize {
        let quota = category.default_quota().min(self.checked.len());
        self.checked[quota..].iter().filter(|c| **c).count()
    }
}

/// One day of logged consumption across the five categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRecord", into = "StoredRecord")]
pub struct DailyRecord {
    protein: CategoryEntry,
    fruits: CategoryEntry,
    vegetables: CategoryEntry,
    carbs: CategoryEntry,
    dairy: CategoryEntry,
}

impl Default for DailyRecord {
    fn default() -> Self {
        Self {
            protein: CategoryEntry::fresh(Category::Protein),
            fruits: CategoryEntry::fresh(Category::Fruits),
            vegetables: CategoryEntry::fresh(Category::Vegetables),
            carbs: CategoryEntry::fresh(Category::Carbs),
            dairy: CategoryEntry::fresh(Category::Dairy),
        }
    }
}

impl DailyRecord {
    pub fn entry(&self, category: Category) -> &CategoryEntry {
        match category {
            Category::Protein => &self.protein,
            Category::Fruits => &self.fruits,
            Category::Vegetables => &self.vegetables,
            Category::Carbs => &self.carbs,
            Category::Dairy => &self.dairy,
        }
    }

    pub fn entry_mut(&mut self, category: Category) -> &mut CategoryEntry {
        match category {
            Category::Protein => &mut self.protein,
            Category::Fruits => &mut self.fruits,
            Category::Vegetables => &mut self.vegetables,
            Category::Carbs => &mut self.carbs,
            Category::Dairy => &mut self.dairy,
        }
    }

    pub fn default_checked(&self) -> usize {
        Category::ALL
            .iter()
            .map(|category| self.entry(*category).default_checked(*category))
            .sum()
    }

    pub fn extra_checked(&self) -> usize {
        Category::ALL
            .iter()
            .map(|category| self.entry(*category).extra_checked(*category))
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    box_count: usize,
    checked: Vec<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRecord {
    protein: StoredEntry,
    fruits: StoredEntry,
    vegetables: StoredEntry,
    carbs: StoredEntry,
    dairy: StoredEntry,
}

fn validate(category: Category, stored: StoredEntry) -> Result<CategoryEntry, String> {
    if stored.checked.len() != stored.box_count {
        return Err(format!(
            "{category}: box_count {} does not match {} checked flags",
            stored.box_count,
            stored.checked.len()
        ));
    }
    if stored.box_count < category.default_quota() {
        return Err(format!(
            "{category}: box_count {} is below the default quota {}",
            stored.box_count,
            category.default_quota()
        ));
    }
    Ok(CategoryEntry {
        checked: stored.checked,
    })
}

impl TryFrom<StoredRecord> for DailyRecord {
    type Error = String;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            protein: validate(Category::Protein, stored.protein)?,
            fruits: validate(Category::Fruits, stored.fruits)?,
            vegetables: validate(Category::Vegetables, stored.vegetables)?,
            carbs: validate(Category::Carbs, stored.carbs)?,
            dairy: validate(Category::Dairy, stored.dairy)?,
        })
    }
}

impl From<DailyRecord> for StoredRecord {
    fn from(record: DailyRecord) -> Self {
        let entry = |entry: CategoryEntry| StoredEntry {
            box_count: entry.checked.len(),
            checked: entry.checked,
        };
        Self {
            protein: entry(record.protein),
            fruits: entry(record.fruits),
            vegetables: entry(record.vegetables),
            carbs: entry(record.carbs),
            dairy: entry(record.dairy),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddBoxRequest {
    pub category: Category,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub category: Category,
    pub index: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryView {
    pub category: Category,
    pub title: String,
    pub default_quota: usize,
    pub box_count: usize,
    pub checked: Vec<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayResponse {
    pub date: DateKey,
    pub label: String,
    pub is_today: bool,
    pub previous: Option<DateKey>,
    pub next: Option<DateKey>,
    pub categories: Vec<CategoryView>,
}

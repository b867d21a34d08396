use crate::models::*;
use crate::store::{Flag, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tab {
    Goals,
    Finance,
    Savings,
}

impl Tab {
    pub(crate) fn all() -> &'static [Tab] {
        &[Self::Goals, Self::Finance, Self::Savings]
    }

    pub(crate) fn next(self) -> Tab {
        let tabs = Self::all();
        let idx = tabs.iter().position(|t| *t == self).unwrap_or(0);
        tabs[(idx + 1) % tabs.len()]
    }

    pub(crate) fn prev(self) -> Tab {
        let tabs = Self::all();
        let idx = tabs.iter().position(|t| *t == self).unwrap_or(0);
        tabs[(idx + tabs.len() - 1) % tabs.len()]
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Goals => write!(f, "Goals"),
            Self::Finance => write!(f, "Finance"),
            Self::Savings => write!(f, "Savings"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "ADD"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum FormField {
    #[default]
    Title,
    Budget,
}

/// The add-item form, filled in while `InputMode::Form` is active.
#[derive(Debug, Clone, Default)]
pub(crate) struct AddItemForm {
    pub(crate) title: String,
    pub(crate) budget: String,
    pub(crate) focus: FormField,
}

impl AddItemForm {
    fn focused(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Budget => &mut self.budget,
        }
    }

    pub(crate) fn push(&mut self, c: char) {
        self.focused().push(c);
    }

    pub(crate) fn backspace(&mut self) {
        self.focused().pop();
    }

    pub(crate) fn switch_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Budget,
            FormField::Budget => FormField::Title,
        };
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) tab: Tab,
    pub(crate) month: Month,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) location: String,

    // Goals
    pub(crate) goals: Vec<Goal>,
    pub(crate) goal_index: usize,

    // Finance
    pub(crate) finance_items: Vec<FinanceItem>,
    pub(crate) item_index: usize,
    pub(crate) item_scroll: usize,
    pub(crate) form: AddItemForm,

    // Savings
    pub(crate) savings: Vec<SavingsPlan>,
    pub(crate) plan_index: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(month: Month, location: String) -> Self {
        Self {
            running: true,
            tab: Tab::Finance,
            month,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            location,

            goals: Vec::new(),
            goal_index: 0,

            finance_items: Vec::new(),
            item_index: 0,
            item_scroll: 0,
            form: AddItemForm::default(),

            savings: Vec::new(),
            plan_index: 0,

            visible_rows: 20,
        }
    }

    /// Refetch all three collections. A failed fetch keeps what was loaded
    /// before; nothing is reported to the user.
    pub(crate) fn reload(&mut self, store: &dyn Store) {
        tracing::debug!(month = self.month.number(), tab = %self.tab, "reload");
        match store.goals() {
            Ok(goals) => self.goals = goals,
            Err(e) => tracing::warn!("loading goals failed: {e:#}"),
        }
        match store.finance_items(self.month) {
            Ok(items) => self.finance_items = items,
            Err(e) => tracing::warn!(month = self.month.number(), "loading finance items failed: {e:#}"),
        }
        match store.savings_plans() {
            Ok(plans) => self.savings = plans,
            Err(e) => tracing::warn!("loading savings plans failed: {e:#}"),
        }
        self.clamp_selection();
    }

    /// Switch tabs. Any change of tab reloads everything.
    pub(crate) fn select_tab(&mut self, store: &dyn Store, tab: Tab) {
        if self.tab == tab {
            return;
        }
        self.tab = tab;
        self.reload(store);
    }

    pub(crate) fn select_month(&mut self, store: &dyn Store, month: Month) {
        if self.month == month {
            return;
        }
        self.month = month;
        self.item_index = 0;
        self.item_scroll = 0;
        self.reload(store);
    }

    /// Write the negation of `current` and reload. The write's outcome is
    /// only logged; the reload shows whatever the store now holds.
    pub(crate) fn toggle_flag(&mut self, store: &dyn Store, flag: Flag, id: i64, current: bool) {
        if let Err(e) = store.set_flag(flag, id, !current) {
            tracing::warn!(?flag, id, "toggle failed: {e:#}");
        }
        self.reload(store);
    }

    /// Toggle the highlighted row of the current tab. Savings have no flag.
    pub(crate) fn toggle_selected(&mut self, store: &dyn Store) {
        let target = match self.tab {
            Tab::Goals => self
                .goals
                .get(self.goal_index)
                .map(|g| (Flag::GoalCompleted, g.id, g.is_completed)),
            Tab::Finance => self
                .finance_items
                .get(self.item_index)
                .map(|i| (Flag::ItemChecked, i.id, i.is_checked)),
            Tab::Savings => None,
        };
        if let Some((flag, id, current)) = target {
            self.toggle_flag(store, flag, id, current);
        }
    }

    /// Insert a finance item for the selected month. An empty title aborts
    /// without touching the store. Returns whether an insert was attempted.
    pub(crate) fn add_item(&mut self, store: &dyn Store, title: &str, budget_text: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        let item = NewFinanceItem::new(self.month, title.to_string(), parse_budget(budget_text));
        if let Err(e) = store.insert_finance_item(&item) {
            tracing::warn!(title = %item.title, "insert failed: {e:#}");
        }
        self.reload(store);
        true
    }

    pub(crate) fn open_form(&mut self, title: &str) {
        self.form = AddItemForm {
            title: title.to_string(),
            ..AddItemForm::default()
        };
        self.input_mode = InputMode::Form;
    }

    pub(crate) fn submit_form(&mut self, store: &dyn Store) {
        let form = std::mem::take(&mut self.form);
        self.input_mode = InputMode::Normal;
        if self.add_item(store, &form.title, &form.budget) {
            self.set_status(format!("Added: {}", form.title.trim()));
        }
    }

    pub(crate) fn cancel_form(&mut self) {
        self.form = AddItemForm::default();
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn totals(&self) -> Totals {
        aggregate(&self.finance_items)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn clamp_selection(&mut self) {
        clamp(&mut self.goal_index, self.goals.len());
        clamp(&mut self.item_index, self.finance_items.len());
        clamp(&mut self.plan_index, self.savings.len());
        if self.item_scroll > self.item_index {
            self.item_scroll = self.item_index;
        }
    }
}

fn clamp(index: &mut usize, len: usize) {
    if *index >= len {
        *index = len.saturating_sub(1);
    }
}

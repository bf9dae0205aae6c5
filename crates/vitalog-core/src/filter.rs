use anyhow::anyhow;
use chrono::NaiveDate;
use tracing::debug;

use crate::config::Config;
use crate::datetime::parse_date_expr;
use crate::entry::CategoryFilter;
use crate::range::Granularity;
use crate::state::DashboardState;

/// What the positional selector terms asked for. Unset fields fall back
/// to the config defaults when the selection is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub date: Option<NaiveDate>,
    pub granularity: Option<Granularity>,
    pub category: Option<CategoryFilter>,
}

impl Selection {
    /// Parses terms like `category:meals`, `view:week`, `date:+3d`, or
    /// the bare forms `meals` / `week`. Unknown terms and repeated
    /// selectors are errors: the tag sets are closed enumerations, so a
    /// typo should fail loudly rather than silently select nothing.
    #[tracing::instrument(skip(terms, today))]
    pub fn parse(terms: &[String], today: NaiveDate) -> anyhow::Result<Self> {
        let mut selection = Self::default();

        for term in terms {
            let term = term.trim();
            if term.is_empty() {
                continue;
            }

            if let Some(value) = term
                .strip_prefix("date:")
                .or_else(|| term.strip_prefix("on:"))
            {
                selection.set_date(parse_date_expr(value, today)?)?;
                continue;
            }

            if let Some(value) = term.strip_prefix("view:") {
                let granularity = Granularity::parse(value)
                    .ok_or_else(|| anyhow!("unrecognized view: {value}"))?;
                selection.set_granularity(granularity)?;
                continue;
            }

            if let Some(value) = term.strip_prefix("category:") {
                let category = CategoryFilter::parse(value)
                    .ok_or_else(|| anyhow!("unrecognized category: {value}"))?;
                selection.set_category(category)?;
                continue;
            }

            if let Some(granularity) = Granularity::parse(term) {
                selection.set_granularity(granularity)?;
                continue;
            }

            if let Some(category) = CategoryFilter::parse(term) {
                selection.set_category(category)?;
                continue;
            }

            if let Ok(date) = parse_date_expr(term, today) {
                selection.set_date(date)?;
                continue;
            }

            return Err(anyhow!(
                "unrecognized selector: {term} (expected a category tag, a view \
                 of day/week/month, or date:EXPR)"
            ));
        }

        debug!(?selection, "parsed selection");
        Ok(selection)
    }

    /// Fills the gaps from config defaults and produces the state the
    /// commands render from.
    pub fn resolve(&self, cfg: &Config, today: NaiveDate) -> DashboardState {
        DashboardState {
            reference_date: self.date.unwrap_or(today),
            granularity: self.granularity.unwrap_or(cfg.granularity),
            category: self.category.unwrap_or(cfg.category),
            expanded: None,
        }
    }

    fn set_date(&mut self, date: NaiveDate) -> anyhow::Result<()> {
        if self.date.is_some() {
            return Err(anyhow!("date selected more than once"));
        }
        self.date = Some(date);
        Ok(())
    }

    fn set_granularity(&mut self, granularity: Granularity) -> anyhow::Result<()> {
        if self.granularity.is_some() {
            return Err(anyhow!("view selected more than once"));
        }
        self.granularity = Some(granularity);
        Ok(())
    }

    fn set_category(&mut self, category: CategoryFilter) -> anyhow::Result<()> {
        if self.category.is_some() {
            return Err(anyhow!("category selected more than once"));
        }
        self.category = Some(category);
        Ok(())
    }
}

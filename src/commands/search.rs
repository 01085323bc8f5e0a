//! Search command - filter and list the entries of one tab

use crate::{
    CompendiumError,
    browse::{Browser, OpenOptions},
    cli::FilterArgs,
    filters::{Conjunction, FilterError, FilterState, SortDirection},
    output,
    tabs::TabName,
};

type Result<T> = std::result::Result<T, CompendiumError>;

/// Filter arguments parsed into typed selections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFilter {
    pub query: Option<String>,
    pub checks: Vec<(String, String)>,
    /// `(trait, negated)`
    pub traits: Vec<(String, bool)>,
    pub any_trait: bool,
    pub ranges: Vec<(String, i64, i64)>,
    pub sort: Option<(String, SortDirection)>,
}

fn split_pair<'a>(arg: &'a str, what: &str) -> Result<(&'a str, &'a str)> {
    arg.split_once('=')
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .ok_or_else(|| CompendiumError::InvalidInput(format!("Expected {what}, got '{arg}'")))
}

fn parse_bound(value: &str, arg: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| CompendiumError::InvalidInput(format!("Invalid range bound in '{arg}'")))
}

impl ParsedFilter {
    /// Parse command-line filter arguments
    ///
    /// # Errors
    ///
    /// Returns `CompendiumError::InvalidInput` for malformed `GROUP=VALUE` or
    /// `GROUP=LO..HI` arguments.
    pub fn parse(args: &FilterArgs) -> Result<Self> {
        let checks = args
            .checks
            .iter()
            .map(|arg| {
                split_pair(arg, "GROUP=VALUE").map(|(k, v)| (k.to_string(), v.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let ranges = args
            .ranges
            .iter()
            .map(|arg| {
                let (group, bounds) = split_pair(arg, "GROUP=LO..HI")?;
                let (lower, upper) = bounds.split_once("..").ok_or_else(|| {
                    CompendiumError::InvalidInput(format!("Expected LO..HI in '{arg}'"))
                })?;
                Ok((group.to_string(), parse_bound(lower, arg)?, parse_bound(upper, arg)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let traits = args
            .traits
            .iter()
            .map(|value| match value.strip_prefix('!') {
                Some(negated) => (negated.to_string(), true),
                None => (value.clone(), false),
            })
            .collect();

        Ok(Self {
            query: args.query.clone(),
            checks,
            traits,
            any_trait: args.any_trait,
            ranges,
            sort: args.sort.clone().map(|by| {
                let direction = args
                    .direction
                    .map_or_else(SortDirection::default, SortDirection::from);
                (by, direction)
            }),
        })
    }

    /// Apply the selections to a tab's filter state
    ///
    /// # Errors
    ///
    /// Returns `FilterError` when a group, option or sort key is not offered
    /// by the tab.
    pub fn apply(&self, filter: &mut FilterState) -> std::result::Result<(), FilterError> {
        if let Some(query) = &self.query {
            filter.set_search(query.as_str());
        }
        for (group, value) in &self.checks {
            if !filter.checkbox_mut(group)?.select(value) {
                return Err(FilterError::UnknownOption {
                    group: group.clone(),
                    option: value.clone(),
                });
            }
        }
        if !self.traits.is_empty() {
            let traits = filter.multiselect_mut("traits")?;
            for (value, not) in &self.traits {
                traits.select(value, *not)?;
            }
            if self.any_trait {
                filter.set_conjunction("traits", Conjunction::Or)?;
            }
        }
        for (group, lower, upper) in &self.ranges {
            filter.set_range(group, *lower, *upper)?;
        }
        if let Some((by, direction)) = &self.sort {
            filter.set_order(by, *direction)?;
        }
        Ok(())
    }
}

/// Print the visible results of the active tab
pub fn print_results(browser: &Browser, quiet: bool) {
    let view = browser.view();
    for entry in &view.results {
        println!("{}", output::entry_line(entry, quiet));
    }
    if !quiet {
        println!("{}", output::results_footer(view.results.len(), view.total));
    }
}

/// Open a tab and apply the parsed filter to it
///
/// # Errors
///
/// Returns an error if the tab cannot be opened or the filter does not fit it.
pub fn open_filtered(browser: &mut Browser, tab: TabName, filter: &FilterArgs) -> Result<()> {
    let parsed = ParsedFilter::parse(filter)?;
    browser.open_tab(tab.as_str(), OpenOptions::default())?;
    browser.update_filter(|state| parsed.apply(state))?;
    Ok(())
}

/// Execute the search command
///
/// # Errors
///
/// Returns an error if the tab cannot be opened or the filter arguments are
/// invalid for it.
pub fn execute(
    browser: &mut Browser,
    tab: TabName,
    filter: &FilterArgs,
    all: bool,
    quiet: bool,
) -> Result<()> {
    open_filtered(browser, tab, filter)?;
    if all {
        while browser.advance_result_limit()? {}
    }
    print_results(browser, quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> FilterArgs {
        FilterArgs {
            query: Some("fire".to_string()),
            checks: vec!["rarity=uncommon".to_string()],
            traits: vec!["fire".to_string(), "!evocation".to_string()],
            ranges: vec!["level=-1..4".to_string()],
            sort: Some("level".to_string()),
            ..FilterArgs::default()
        }
    }

    #[test]
    fn test_parse_filter_args() {
        let parsed = ParsedFilter::parse(&args()).unwrap();
        assert_eq!(parsed.checks, vec![("rarity".to_string(), "uncommon".to_string())]);
        assert_eq!(
            parsed.traits,
            vec![("fire".to_string(), false), ("evocation".to_string(), true)]
        );
        assert_eq!(parsed.ranges, vec![("level".to_string(), -1, 4)]);
        assert_eq!(parsed.sort, Some(("level".to_string(), SortDirection::Asc)));
    }

    #[test]
    fn test_malformed_check() {
        let args = FilterArgs {
            checks: vec!["rarity".to_string()],
            ..FilterArgs::default()
        };
        assert!(matches!(
            ParsedFilter::parse(&args),
            Err(CompendiumError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_malformed_range() {
        let args = FilterArgs {
            ranges: vec!["level=1-4".to_string()],
            ..FilterArgs::default()
        };
        assert!(ParsedFilter::parse(&args).is_err());
    }

    #[test]
    fn test_apply_unknown_group() {
        let parsed = ParsedFilter::parse(&FilterArgs {
            checks: vec!["size=huge".to_string()],
            ..FilterArgs::default()
        })
        .unwrap();
        let mut state = FilterState::new(crate::filters::SortOrder::new(Vec::new()));
        assert_eq!(
            parsed.apply(&mut state),
            Err(FilterError::UnknownGroup("size".to_string()))
        );
    }
}

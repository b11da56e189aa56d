use otd_core::responses::MonthOption;
use otd_core::selector::DaySelector;

use crate::cli::GlobalFlags;
use crate::output;

/// Handle `otd months`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output::output(&month_options(), flags.format)
}

fn month_options() -> Vec<MonthOption> {
    DaySelector::month_options()
        .into_iter()
        .map(|(number, name)| MonthOption {
            number,
            name: name.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::month_options;

    #[test]
    fn twelve_dutch_months_in_order() {
        let months = month_options();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].name, "januari");
        assert_eq!(months[2].name, "maart");
        assert_eq!(months[11].number, 12);
        assert_eq!(months[11].name, "december");
    }
}

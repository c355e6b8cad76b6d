use super::utils::ScreenUtils;
use crate::clicker::{MAX_FREQUENCY_HZ, MAX_JITTER_MS, MIN_FREQUENCY_HZ};
use crate::core::ClickerResult;
use crate::input::HotkeySlot;
use crate::menu::{Align, DoubleMenu};

/// Reads a click frequency. `None` when the user leaves the line empty.
pub struct FrequencyScreen;

impl FrequencyScreen {
    pub fn show(current: u32) -> ClickerResult<Option<u32>> {
        let message = format!(
            "\nFrequency in clicks per second ({}-{}, now {}): ",
            MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ, current
        );
        prompt_until_valid(&message, Self::parse)
    }

    pub fn parse(input: &str) -> Result<u32, String> {
        parse_bounded(input, MIN_FREQUENCY_HZ, MAX_FREQUENCY_HZ)
    }
}

pub struct DelayScreen;

impl DelayScreen {
    pub fn show(current: u32) -> ClickerResult<Option<u32>> {
        let message = format!(
            "\nMaximum random delay in ms (0-{}, now {}): ",
            MAX_JITTER_MS, current
        );
        prompt_until_valid(&message, Self::parse)
    }

    pub fn parse(input: &str) -> Result<u32, String> {
        parse_bounded(input, 0, MAX_JITTER_MS)
    }
}

pub struct HotkeyScreen;

impl HotkeyScreen {
    pub fn show(current: HotkeySlot) -> ClickerResult<Option<HotkeySlot>> {
        ScreenUtils::clear_console();

        let mut menu = DoubleMenu::new(44)
            .header("SELECT HOTKEY", Align::Center)?
            .blank()?
            .plain(&format!("Current hotkey: {}", current))?
            .blank()?;

        for row in HotkeySlot::all().collect::<Vec<_>>().chunks(4) {
            let line = row
                .iter()
                .map(|slot| format!("{:>2}. {:<4}", slot.index() + 1, slot.name()))
                .collect::<Vec<_>>()
                .join("  ");
            menu = menu.plain(&format!("  {}", line))?;
        }

        menu.blank()?.finish(&mut std::io::stdout())?;

        prompt_until_valid("Select 1-12 or type F1-F12: ", Self::parse)
    }

    pub fn parse(input: &str) -> Result<HotkeySlot, String> {
        let input = input.trim();

        if let Some(slot) = HotkeySlot::parse(input) {
            return Ok(slot);
        }

        input
            .parse::<u8>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| HotkeySlot::new(index).ok())
            .ok_or_else(|| format!("'{}' is not one of F1-F12", input))
    }
}

fn parse_bounded(input: &str, min: u32, max: u32) -> Result<u32, String> {
    let value = input
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("'{}' is not a number", input.trim()))?;

    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(format!("Value must be between {} and {}", min, max))
    }
}

fn prompt_until_valid<T>(
    message: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> ClickerResult<Option<T>> {
    loop {
        let input = ScreenUtils::prompt(message)?;

        if input.trim().is_empty() {
            return Ok(None);
        }

        match parse(&input) {
            Ok(value) => return Ok(Some(value)),
            Err(reason) => println!("✗ {}", reason),
        }
    }
}

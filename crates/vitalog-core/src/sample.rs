use chrono::{NaiveDate, NaiveDateTime};

use crate::entry::{Category, Entry, Status};

fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

/// The fixed demo records the dashboard ships with, used whenever no
/// entries file is configured. Three days of activity across every
/// category, mid-March 2024.
pub fn entries() -> Vec<Entry> {
    vec![
        Entry::new(
            Category::Meals,
            at(2024, 3, 14, 8, 10),
            "Oatmeal with berries",
            Status::Favorable,
        )
        .with_details("Steel-cut oats, blueberries, walnuts, oat milk")
        .with_metric("Calories", "420 kcal")
        .with_metric("Protein", "14 g")
        .with_note("No bloating afterwards"),
        Entry::new(
            Category::Water,
            at(2024, 3, 14, 12, 0),
            "Midday hydration check",
            Status::Neutral,
        )
        .with_metric("Total", "1.2 L"),
        Entry::new(
            Category::Alcohol,
            at(2024, 3, 14, 20, 45),
            "Glass of red wine",
            Status::Cautionary,
        )
        .with_metric("Amount", "150 ml")
        .with_note("Slight flush within the hour"),
        Entry::new(
            Category::Meals,
            at(2024, 3, 15, 8, 0),
            "Scrambled eggs on toast",
            Status::Neutral,
        )
        .with_details("Two eggs, sourdough, butter")
        .with_metric("Calories", "510 kcal"),
        Entry::new(
            Category::Exercise,
            at(2024, 3, 15, 9, 30),
            "Morning run",
            Status::Favorable,
        )
        .with_details("Easy pace along the river loop")
        .with_metric("Distance", "5.0 km")
        .with_metric("Duration", "28 min")
        .with_metric("Avg HR", "148 bpm"),
        Entry::new(
            Category::Supplements,
            at(2024, 3, 15, 9, 45),
            "Vitamin D + magnesium",
            Status::Neutral,
        )
        .with_metric("Vitamin D", "2000 IU")
        .with_metric("Magnesium", "200 mg"),
        Entry::new(
            Category::Skin,
            at(2024, 3, 15, 21, 15),
            "Forearm rash follow-up",
            Status::Adverse,
        )
        .with_details("Redness returned after the afternoon walk")
        .with_metric("Severity", "3 / 5")
        .with_note("Flared within two hours of sun exposure"),
        Entry::new(
            Category::Mood,
            at(2024, 3, 15, 22, 0),
            "Evening check-in",
            Status::Favorable,
        )
        .with_metric("Mood", "7 / 10")
        .with_metric("Stress", "low"),
        Entry::new(
            Category::Meals,
            at(2024, 3, 16, 8, 0),
            "Greek yogurt and granola",
            Status::Favorable,
        )
        .with_metric("Calories", "380 kcal"),
        Entry::new(
            Category::Exercise,
            at(2024, 3, 16, 17, 30),
            "Strength session",
            Status::Neutral,
        )
        .with_details("Upper body, three sets each")
        .with_metric("Duration", "45 min")
        .with_note("Mild shoulder fatigue"),
        Entry::new(
            Category::Mood,
            at(2024, 3, 16, 21, 40),
            "Evening check-in",
            Status::Neutral,
        )
        .with_metric("Mood", "6 / 10")
        .with_metric("Stress", "medium"),
    ]
}

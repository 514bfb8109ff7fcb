//! Write a small deterministic review dataset for demos and manual testing.

use anyhow::{Context, Result};

struct SampleRow {
    airline: &'static str,
    route: &'static str,
    class: &'static str,
    traveller: &'static str,
    review: &'static str,
    rating: &'static str,
}

const ROWS: &[SampleRow] = &[
    SampleRow {
        airline: "British Airways",
        route: "London to New York",
        class: "Economy",
        traveller: "Solo Leisure",
        review: "Decent legroom for economy and the wifi held up over the Atlantic.",
        rating: "7",
    },
    SampleRow {
        airline: "British Airways",
        route: "London to Paris",
        class: "Busines",
        traveller: "Business",
        review: "Short hop, lounge at Heathrow was the highlight.",
        rating: "8",
    },
    SampleRow {
        airline: "Qantas",
        route: "Sydney to Singapore via Darwin",
        class: "Economy",
        traveller: "Couple Leisure",
        review: "Friendly crew, food was average, seat-back screens on every seat.",
        rating: "6",
    },
    SampleRow {
        airline: "Emirates",
        route: "Dubai nto London",
        class: "First",
        traveller: "Couple Leisure",
        review: "Superb lounge access and the onboard shower is something else.",
        rating: "10",
    },
    SampleRow {
        airline: "Emirates",
        route: "Dubai to Sydney",
        class: "Economyy",
        traveller: "Family Leisure",
        review: "Long flight but the wifi and entertainment kept the kids quiet.",
        rating: "9",
    },
    SampleRow {
        airline: "Ryanair",
        route: "Dublin toMAD",
        class: "Eco",
        traveller: "Solo Leisure",
        review: "You get what you pay for. No frills whatsoever.",
        rating: "4",
    },
    SampleRow {
        airline: "KLM",
        route: "Amsterdam to Rome",
        class: "Premium Economy",
        traveller: "Business",
        review: "Quiet cabin, extra legroom worth the upgrade.",
        rating: "8",
    },
    SampleRow {
        airline: "Lufthansa",
        route: "FrankfurttoTokyo",
        class: "Business",
        traveller: "Business",
        review: "Flat bed, punctual, lounge in Frankfurt was packed though.",
        rating: "",
    },
];

fn main() -> Result<()> {
    let output_path = "sample_reviews.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;

    writer.write_record([
        "Airline",
        "Route",
        "Class",
        "Type of Traveller",
        "Reviews",
        "Overall Rating",
    ])?;
    for row in ROWS {
        writer.write_record([
            row.airline,
            row.route,
            row.class,
            row.traveller,
            row.review,
            row.rating,
        ])?;
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {} reviews to {output_path}", ROWS.len());
    Ok(())
}

//! Turns per-leg berth occupancy into the rows and fragments the search returns.

use shared::{
    domain::{Berth, CoachChart, Leg},
    protocol::SeatRow,
};

/// Coalesces consecutive vacant legs of each berth into journeys.
///
/// A vacant leg extends the open journey only when it departs from the
/// station the journey currently ends at. Coach, berth and leg order are
/// preserved in the output.
pub fn vacant_rows(charts: &[CoachChart]) -> Vec<SeatRow> {
    let mut rows = Vec::new();
    for chart in charts {
        let coach = chart.display_name();
        for berth in &chart.berths {
            collect_berth_journeys(coach, berth, &mut rows);
        }
    }
    rows
}

fn collect_berth_journeys(coach: &str, berth: &Berth, rows: &mut Vec<SeatRow>) {
    let mut open: Option<SeatRow> = None;

    for leg in &berth.legs {
        if !leg.is_vacant() {
            rows.extend(open.take());
            continue;
        }

        match open.as_mut() {
            Some(journey) if journey.to == leg.from => journey.to = leg.to.clone(),
            Some(_) => {
                rows.extend(open.take());
                open = Some(start_journey(coach, berth, leg));
            }
            None => open = Some(start_journey(coach, berth, leg)),
        }
    }

    rows.extend(open);
}

fn start_journey(coach: &str, berth: &Berth, leg: &Leg) -> SeatRow {
    SeatRow {
        coach: coach.to_string(),
        seat: berth.berth_no.to_string(),
        from: leg.from.clone(),
        to: leg.to.clone(),
        seat_type: berth.berth_code.clone(),
    }
}

/// Flattens every vacant leg into a compact `COACH-BERTH (FROM->TO)` label
/// for the itinerary advisor.
pub fn vacant_fragments(charts: &[CoachChart]) -> Vec<String> {
    charts
        .iter()
        .flat_map(|chart| {
            let coach = chart.display_name();
            chart.berths.iter().flat_map(move |berth| {
                berth
                    .legs
                    .iter()
                    .filter(|leg| leg.is_vacant())
                    .map(move |leg| {
                        format!("{coach}-{} ({}->{})", berth.berth_no, leg.from, leg.to)
                    })
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/chart_tests.rs"]
mod tests;

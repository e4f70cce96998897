use bikeflow::controller::TrafficController;
use bikeflow::dataset::{parse_stations, parse_trips};
use bikeflow::filter::TimeFilter;

fn load_fixtures() -> TrafficController {
    let stations = parse_stations(include_bytes!("fixtures/stations.json"))
        .expect("Failed to parse station feed");
    let trips =
        parse_trips(include_bytes!("fixtures/trips.csv")).expect("Failed to parse trip log");

    TrafficController::new(stations, trips)
}

#[test]
fn test_full_pipeline_baseline() {
    let controller = load_fixtures();

    let summaries = controller.summaries();
    assert_eq!(summaries.len(), 3);

    // A32000: departs r0001 and r0003, receives r0002 and r0006.
    assert_eq!(summaries[0].station_id, "A32000");
    assert_eq!(summaries[0].departures, 2);
    assert_eq!(summaries[0].arrivals, 2);
    assert_eq!(summaries[0].total, 4);

    // B32012: departs r0002 and the round trip r0005, receives r0001,
    // r0004 and r0005.
    assert_eq!(summaries[1].departures, 2);
    assert_eq!(summaries[1].arrivals, 3);
    assert_eq!(summaries[1].total, 5);

    // C32005: one out, one in.
    assert_eq!(summaries[2].total, 2);

    let scale = controller.radius_scale();
    assert_eq!(scale.domain(), (0.0, 5.0));
    assert_eq!(scale.range(), (0.0, 25.0));
}

#[test]
fn test_full_pipeline_morning_filter() {
    let mut controller = load_fixtures();

    let summaries = controller.set_filter(TimeFilter::At(510));

    // The 08:30 window keeps r0001, r0002 and r0006 (its 07:30 end is
    // exactly 60 minutes out); the late-night r0005 straddles midnight but
    // the window does not wrap, so it is excluded.
    assert_eq!(summaries[0].departures, 1);
    assert_eq!(summaries[0].arrivals, 2);
    assert_eq!(summaries[0].total, 3);

    assert_eq!(summaries[1].total, 2);
    assert_eq!(summaries[2].total, 0);

    let scale = controller.radius_scale();
    assert_eq!(scale.domain(), (0.0, 3.0));
    assert_eq!(scale.range(), (3.0, 50.0));
}

#[test]
fn test_full_pipeline_filter_round_trip_restores_baseline() {
    let mut controller = load_fixtures();
    let baseline = controller.summaries().to_vec();

    controller.set_filter(TimeFilter::At(600));
    let restored = controller.set_filter(TimeFilter::All).to_vec();

    assert_eq!(restored, baseline);
}

#[test]
fn test_full_pipeline_flow_buckets() {
    let controller = load_fixtures();
    let flow = controller.flow_scale();

    // B32012 leans inbound: 2 of 5 trips depart.
    let b = &controller.summaries()[1];
    assert_eq!(b.departure_ratio(), 0.4);
    assert_eq!(flow.quantize(b.departure_ratio()), 0.5);

    // A32000 is balanced.
    let a = &controller.summaries()[0];
    assert_eq!(flow.quantize(a.departure_ratio()), 0.5);
}

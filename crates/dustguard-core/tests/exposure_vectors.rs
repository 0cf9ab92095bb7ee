//! Dust-exposure estimator vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use dustguard_core::exposure::{max_dust_exposure_sat, DEFAULT_DUST_EXPOSURE_THRESHOLD_SAT};
use dustguard_core::{ChannelConstraints, DustExposureEstimator, OpenChannelInfo};

use vector_loader::{load, ExposureVector};

fn constraints(dust_limit_sat: u64, max_accepted_htlcs: u32) -> ChannelConstraints {
    ChannelConstraints {
        dust_limit_sat,
        max_accepted_htlcs,
        ..Default::default()
    }
}

#[test]
fn exposure_vectors() {
    let files = [
        "exposure_example.json",
        "exposure_example_low_threshold.json",
        "exposure_equal_threshold.json",
        "exposure_max_htlcs.json",
        "exposure_zero_htlcs.json",
    ];

    for f in files {
        let v: ExposureVector = load(f);
        assert_eq!(
            max_dust_exposure_sat(&v.channel),
            v.expect.max_dust_exposure_sat,
            "vector={}",
            v.description
        );

        let rec = DustExposureEstimator::new(v.threshold_sat).evaluate(&v.channel);
        assert_eq!(rec.is_some(), v.expect.recommend, "vector={}", v.description);

        if let Some(rec) = rec {
            assert_eq!(rec.channel_point, v.channel.channel_point, "vector={}", v.description);
            assert_eq!(rec.max_dust_exposure_sat, v.expect.max_dust_exposure_sat);
            assert_eq!(rec.threshold_sat, v.threshold_sat);
        }
    }
}

#[test]
fn default_threshold() {
    assert_eq!(DEFAULT_DUST_EXPOSURE_THRESHOLD_SAT, 500_000);
    assert_eq!(DustExposureEstimator::default().threshold_sat(), 500_000);
}

#[test]
fn pending_amount_does_not_change_estimate() {
    let mut info = OpenChannelInfo {
        channel_point: "cp:0".into(),
        local_constraints: constraints(400, 30),
        remote_constraints: constraints(600, 20),
        ..Default::default()
    };
    let before = max_dust_exposure_sat(&info);
    info.local_constraints.max_pending_amt_msat = u64::MAX;
    info.remote_constraints.max_pending_amt_msat = 1;
    assert_eq!(max_dust_exposure_sat(&info), before);
}

#[test]
fn huge_limits_saturate_and_are_flagged() {
    let info = OpenChannelInfo {
        channel_point: "cp:1".into(),
        local_constraints: constraints(u64::MAX / 2, u32::MAX),
        remote_constraints: constraints(1, u32::MAX),
        ..Default::default()
    };
    assert_eq!(max_dust_exposure_sat(&info), u64::MAX);

    let rec = DustExposureEstimator::new(u64::MAX - 1).evaluate(&info);
    assert!(rec.is_some());
}

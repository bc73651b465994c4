//! Integration test: timer thread and event handlers sharing one tunnel.

use std::thread;

use wt_core::MonotonicClock;
use wt_sim::{
    ANGLE_OF_ATTACK_LIMITS, AeroModel, FAN_SPEED_LIMITS, RandomNoise, SharedTunnel, WindTunnel,
};

#[test]
fn concurrent_mutation_and_polling_stay_in_bounds() {
    let shared = SharedTunnel::new(WindTunnel::new(
        AeroModel::default(),
        RandomNoise::seeded(77),
        MonotonicClock,
    ));
    shared.start();

    let handlers: Vec<_> = (0..4)
        .map(|i| {
            let tunnel = shared.clone();
            thread::spawn(move || {
                for step in 0..500 {
                    let sign = if (step + i) % 2 == 0 { 1.0 } else { -1.0 };
                    tunnel.adjust_fan_speed(sign * 7.0);
                    tunnel.adjust_angle_of_attack(sign * 3.0);
                    if step % 97 == 0 {
                        tunnel.toggle();
                    }
                }
            })
        })
        .collect();

    let poller = {
        let tunnel = shared.clone();
        thread::spawn(move || {
            let mut readings = Vec::with_capacity(1_000);
            for _ in 0..1_000 {
                readings.push(tunnel.poll());
            }
            readings
        })
    };

    for h in handlers {
        h.join().unwrap();
    }
    let readings = poller.join().unwrap();

    for r in &readings {
        assert!(ANGLE_OF_ATTACK_LIMITS.contains(r.angle_of_attack_deg));
        assert!(FAN_SPEED_LIMITS.contains(r.fan_output_pct));
        assert!(r.airspeed_mph >= 0.0 && r.airspeed_mph <= 62.0);
        if !r.is_running {
            assert_eq!(r.airspeed_mph, 0.0);
        }
    }

    let state = shared.snapshot_state();
    assert!(FAN_SPEED_LIMITS.contains(state.fan_speed_pct()));
    assert!(ANGLE_OF_ATTACK_LIMITS.contains(state.angle_of_attack_deg()));
}

#[test]
fn reset_through_any_handle() {
    let a = SharedTunnel::from(WindTunnel::with_defaults());
    let b = a.clone();
    a.set_fan_speed(95.0);
    a.set_angle_of_attack(14.0);
    b.reset();
    let state = a.snapshot_state();
    assert_eq!(state.fan_speed_pct(), 50.0);
    assert_eq!(state.angle_of_attack_deg(), 0.0);
}

//! `params`: print the vehicle parameter table entry for a platform.

use cruise_config::vehicle::{
    CarVariant, GainsAtSpeed, LateralTuning, VehicleParams, vehicle_params,
};
use eyre::WrapErr;

pub fn run_params(
    cfg: &cruise_config::Config,
    car: Option<&str>,
    fingerprint: &[u32],
    eps_fw: &[String],
    at_speed: Option<f32>,
    json: bool,
) -> eyre::Result<()> {
    if at_speed.is_some_and(|v| !v.is_finite()) {
        eyre::bail!("--at-speed must be a finite speed in m/s");
    }
    let car: CarVariant = match car {
        Some(name) => name.parse()?,
        None => cfg
            .vehicle
            .car
            .ok_or_else(|| eyre::eyre!("no car given: pass --car or set [vehicle] car"))?,
    };
    // Command-line lists replace the config ones rather than extending them.
    let fingerprint = if fingerprint.is_empty() {
        cfg.vehicle.fingerprint.as_slice()
    } else {
        fingerprint
    };
    let eps_fw = if eps_fw.is_empty() {
        cfg.vehicle.eps_fw.as_slice()
    } else {
        eps_fw
    };
    let fw: Vec<&[u8]> = eps_fw.iter().map(|s| s.as_bytes()).collect();

    let p = vehicle_params(car, fingerprint, &fw);
    tracing::debug!(%car, bsm = p.enable_bsm, hybrid = p.hybrid_ecu, "vehicle params");
    let gains = at_speed.map(|v| p.gains_at(v));
    if json {
        let mut v = serde_json::to_value(&p).wrap_err("serialize vehicle params")?;
        if let (Some(g), Some(obj)) = (gains, v.as_object_mut()) {
            obj.insert(
                "gains_at_speed".into(),
                serde_json::to_value(g).wrap_err("serialize scheduled gains")?,
            );
        }
        println!("{v}");
    } else {
        print_text(&p);
        if let Some(g) = gains {
            print_gains(&g);
        }
    }
    Ok(())
}

fn print_text(p: &VehicleParams) {
    println!("car:                  {}", p.car);
    println!("dashcam only:         {}", p.dashcam_only);
    println!("safety param:         {}", p.safety.param);
    println!("steer actuator delay: {:.2} s", p.steer_actuator_delay);
    println!("steer limit timer:    {:.2} s", p.steer_limit_timer);
    println!("min steer speed:      {:.2} m/s", p.min_steer_speed);
    match (p.wheelbase, p.center_to_front) {
        (Some(wb), Some(cf)) => println!("wheelbase:            {wb:.2} m (cg {cf:.2} m from front)"),
        _ => println!("wheelbase:            (from platform database)"),
    }
    match &p.lateral {
        LateralTuning::Torque {
            steering_angle_deadzone_deg,
            use_steering_angle,
        } => println!(
            "lateral:              torque (deadzone {steering_angle_deadzone_deg:.1} deg, steering angle {use_steering_angle})"
        ),
        LateralTuning::Pid { kp, ki, kf } => println!(
            "lateral:              pid kp {:?}/{:?} ki {:?}/{:?} kf {kf}",
            kp.bp, kp.v, ki.bp, ki.v
        ),
    }
    println!(
        "longitudinal:         kp {:?}/{:?} ki {:?}/{:?}",
        p.longitudinal.kp.bp, p.longitudinal.kp.v, p.longitudinal.ki.bp, p.longitudinal.ki.v
    );
    println!(
        "stopping:             {} (decel {:.2} m/s^2)",
        p.stopping_control, p.stopping_decel_rate
    );
    println!("bsm:                  {}", p.enable_bsm);
    println!("hybrid ecu:           {}", p.hybrid_ecu);
}

fn print_gains(g: &GainsAtSpeed) {
    println!(
        "gains @ {:.1} m/s:      long kp {:.4} ki {:.4}",
        g.speed, g.long_kp, g.long_ki
    );
    if let (Some(kp), Some(ki)) = (g.lat_kp, g.lat_ki) {
        println!("                      lat kp {kp:.4} ki {ki:.4}");
    }
}

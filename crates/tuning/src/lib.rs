use thiserror::Error;

/// First-order-plus-dead-time model identified from an open-loop step test.
#[derive(Clone, Copy, Debug)]
pub struct ProcessModel {
    /// Steady-state process gain K.
    pub gain: f64,
    /// Time constant tau (s).
    pub tau_s: f64,
    /// Dead time L (s).
    pub dead_time_s: f64,
}

/// Stability-boundary point from a sustained-oscillation closed-loop test.
#[derive(Clone, Copy, Debug)]
pub struct CriticalPoint {
    /// Ultimate gain Ku.
    pub ku: f64,
    /// Ultimate period Tu (s).
    pub tu_s: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerType {
    P,
    Pi,
    Pid,
}

/// Target response shape for Chien-Hrones-Reswick tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseStyle {
    /// Setpoint tracking, 0% overshoot.
    Setpoint,
    /// Setpoint tracking, 20% overshoot.
    Setpoint20,
    /// Load rejection, 0% overshoot.
    Load,
    /// Load rejection, 20% overshoot.
    Load20,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    ZnOpen,
    ZnClosed,
    CohenCoon,
    Simc,
    TyreusLuyben,
    Chr,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TuningError {
    #[error("{method:?} tuning does not define a {controller:?} controller")]
    InvalidCombination {
        method: Method,
        controller: ControllerType,
    },
}

/// Controller parameters in the classical (Kp, Ti, Td) form, with the
/// parallel-form Ki and Kd derived alongside.
///
/// Absent fields mean "not applicable for this controller type": a P-only
/// result carries `None` in all four optional fields, and `ki`/`kd` are
/// present exactly when `ti_s`/`td_s` are. The constructors maintain this,
/// so `ki == kp / ti` and `kd == kp * td` always hold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PidGains {
    pub kp: f64,
    pub ti_s: Option<f64>,
    pub td_s: Option<f64>,
    pub ki: Option<f64>,
    pub kd: Option<f64>,
}

impl PidGains {
    pub fn p(kp: f64) -> Self {
        Self {
            kp,
            ti_s: None,
            td_s: None,
            ki: None,
            kd: None,
        }
    }

    pub fn pi(kp: f64, ti_s: f64) -> Self {
        Self {
            kp,
            ti_s: Some(ti_s),
            td_s: None,
            ki: Some(kp / ti_s),
            kd: None,
        }
    }

    pub fn pid(kp: f64, ti_s: f64, td_s: f64) -> Self {
        Self {
            kp,
            ti_s: Some(ti_s),
            td_s: Some(td_s),
            ki: Some(kp / ti_s),
            kd: Some(kp * td_s),
        }
    }
}

/// A tuning method together with exactly the inputs that method needs.
///
/// Callers are responsible for validating the numeric domains (K > 0,
/// tau > 0, L > 0, Ku > 0, Tu > 0, tau_c > 0) before building a request;
/// out-of-domain values propagate as non-finite gains rather than errors.
#[derive(Clone, Copy, Debug)]
pub enum TuningRequest {
    /// Ziegler-Nichols open-loop (process reaction curve).
    ZnOpen {
        model: ProcessModel,
        controller: ControllerType,
    },
    /// Ziegler-Nichols closed-loop (ultimate sensitivity).
    ZnClosed {
        critical: CriticalPoint,
        controller: ControllerType,
    },
    CohenCoon {
        model: ProcessModel,
        controller: ControllerType,
    },
    /// Skogestad SIMC with a chosen closed-loop time constant tau_c.
    Simc {
        model: ProcessModel,
        tau_c_s: f64,
        controller: ControllerType,
    },
    TyreusLuyben {
        critical: CriticalPoint,
        controller: ControllerType,
    },
    Chr {
        model: ProcessModel,
        style: ResponseStyle,
        controller: ControllerType,
    },
}

/// Compute PID gains for the requested method and controller type.
pub fn tune(req: &TuningRequest) -> Result<PidGains, TuningError> {
    match *req {
        TuningRequest::ZnOpen { model, controller } => Ok(zn_open(&model, controller)),
        TuningRequest::ZnClosed {
            critical,
            controller,
        } => Ok(zn_closed(&critical, controller)),
        TuningRequest::CohenCoon { model, controller } => Ok(cohen_coon(&model, controller)),
        TuningRequest::Simc {
            model,
            tau_c_s,
            controller,
        } => simc(&model, tau_c_s, controller),
        TuningRequest::TyreusLuyben {
            critical,
            controller,
        } => tyreus_luyben(&critical, controller),
        TuningRequest::Chr {
            model,
            style,
            controller,
        } => chr(&model, style, controller),
    }
}

pub fn zn_open(m: &ProcessModel, controller: ControllerType) -> PidGains {
    let kl = m.gain * m.dead_time_s;
    match controller {
        ControllerType::P => PidGains::p(m.tau_s / kl),
        ControllerType::Pi => PidGains::pi(0.9 * m.tau_s / kl, 3.33 * m.dead_time_s),
        ControllerType::Pid => PidGains::pid(
            1.2 * m.tau_s / kl,
            2.0 * m.dead_time_s,
            0.5 * m.dead_time_s,
        ),
    }
}

pub fn zn_closed(c: &CriticalPoint, controller: ControllerType) -> PidGains {
    match controller {
        ControllerType::P => PidGains::p(0.5 * c.ku),
        ControllerType::Pi => PidGains::pi(0.45 * c.ku, 0.83 * c.tu_s),
        ControllerType::Pid => PidGains::pid(0.6 * c.ku, 0.5 * c.tu_s, 0.125 * c.tu_s),
    }
}

pub fn cohen_coon(m: &ProcessModel, controller: ControllerType) -> PidGains {
    let kl = m.gain * m.dead_time_s;
    let r = m.dead_time_s / m.tau_s;
    match controller {
        ControllerType::P => PidGains::p((m.tau_s / kl) * (1.0 + r / 3.0)),
        ControllerType::Pi => PidGains::pi(
            (m.tau_s / kl) * (0.9 + r / 12.0),
            m.dead_time_s * (30.0 + 3.0 * r) / (9.0 + 20.0 * r),
        ),
        ControllerType::Pid => PidGains::pid(
            (m.tau_s / kl) * (4.0 / 3.0 + r / 4.0),
            m.dead_time_s * (32.0 + 6.0 * r) / (13.0 + 8.0 * r),
            m.dead_time_s * 4.0 / (11.0 + 2.0 * r),
        ),
    }
}

pub fn simc(
    m: &ProcessModel,
    tau_c_s: f64,
    controller: ControllerType,
) -> Result<PidGains, TuningError> {
    let kp = (m.tau_s / m.gain) / (tau_c_s + m.dead_time_s);
    let ti = m.tau_s.min(4.0 * (tau_c_s + m.dead_time_s));
    match controller {
        ControllerType::P => Err(TuningError::InvalidCombination {
            method: Method::Simc,
            controller,
        }),
        ControllerType::Pi => Ok(PidGains::pi(kp, ti)),
        ControllerType::Pid => Ok(PidGains::pid(kp, ti, m.tau_s)),
    }
}

pub fn tyreus_luyben(
    c: &CriticalPoint,
    controller: ControllerType,
) -> Result<PidGains, TuningError> {
    match controller {
        ControllerType::P => Err(TuningError::InvalidCombination {
            method: Method::TyreusLuyben,
            controller,
        }),
        ControllerType::Pi => Ok(PidGains::pi(0.45 * c.ku, c.tu_s / 1.2)),
        ControllerType::Pid => Ok(PidGains::pid(0.6 * c.ku, c.tu_s / 2.0, c.tu_s / 6.25)),
    }
}

pub fn chr(
    m: &ProcessModel,
    style: ResponseStyle,
    controller: ControllerType,
) -> Result<PidGains, TuningError> {
    let kl = m.gain * m.dead_time_s;
    let tau = m.tau_s;
    let l = m.dead_time_s;
    match controller {
        ControllerType::P => Err(TuningError::InvalidCombination {
            method: Method::Chr,
            controller,
        }),
        ControllerType::Pi => Ok(match style {
            ResponseStyle::Setpoint => PidGains::pi(0.6 * tau / kl, tau),
            ResponseStyle::Setpoint20 => PidGains::pi(0.7 * tau / kl, 2.3 * l),
            ResponseStyle::Load => PidGains::pi(0.35 * tau / kl, 1.2 * tau),
            ResponseStyle::Load20 => PidGains::pi(0.6 * tau / kl, tau),
        }),
        ControllerType::Pid => Ok(match style {
            ResponseStyle::Setpoint => PidGains::pid(0.95 * tau / kl, 1.4 * tau, 0.47 * tau),
            ResponseStyle::Setpoint20 => PidGains::pid(1.2 * tau / kl, 2.0 * l, 0.42 * l),
            ResponseStyle::Load => PidGains::pid(0.6 * tau / kl, tau, 0.5 * tau),
            ResponseStyle::Load20 => PidGains::pid(0.95 * tau / kl, 1.4 * tau, 0.47 * tau),
        }),
    }
}

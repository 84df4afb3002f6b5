use std::collections::VecDeque;

/// Gain of the fixed reference process the simulator runs against.
pub const PROCESS_GAIN: f64 = 1.0;
/// Time constant of the reference process (s).
pub const PROCESS_TAU_S: f64 = 1.0;
/// Dead time of the reference process (s).
pub const PROCESS_DEAD_TIME_S: f64 = 0.5;

/// Saturation limits applied to the controller output.
pub const CONTROL_MIN: f64 = -10.0;
pub const CONTROL_MAX: f64 = 10.0;

#[derive(Clone, Copy, Debug)]
pub struct SimulationConfig {
    pub kp: f64,
    /// Integral gain (parallel form), not integral time.
    pub ki: f64,
    /// Derivative gain (parallel form), not derivative time.
    pub kd: f64,
    pub setpoint: f64,
    /// Fixed integration step (s). Must be > 0.
    pub dt_s: f64,
    /// Total simulated time (s).
    pub horizon_s: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.5,
            kd: 0.1,
            setpoint: 1.0,
            dt_s: 0.01,
            horizon_s: 10.0,
        }
    }
}

/// Time series from one simulation run: five same-length columns, one row
/// per integration step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationTrace {
    pub time_s: Vec<f64>,
    pub output: Vec<f64>,
    pub setpoint: Vec<f64>,
    pub error: Vec<f64>,
    pub control: Vec<f64>,
}

impl SimulationTrace {
    fn with_capacity(steps: usize) -> Self {
        Self {
            time_s: Vec::with_capacity(steps),
            output: Vec::with_capacity(steps),
            setpoint: Vec::with_capacity(steps),
            error: Vec::with_capacity(steps),
            control: Vec::with_capacity(steps),
        }
    }

    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }
}

/// Simulate the closed-loop step response of the reference process under a
/// PID controller with the given gains.
///
/// Explicit Euler at a fixed step: exactly `floor(horizon_s / dt_s)` rows,
/// no early exit, no state carried between calls. Two calls with the same
/// config produce bit-identical traces.
pub fn simulate(cfg: &SimulationConfig) -> SimulationTrace {
    let steps = (cfg.horizon_s / cfg.dt_s).floor() as usize;
    let delay_steps = (PROCESS_DEAD_TIME_S / cfg.dt_s).floor() as usize;

    let mut trace = SimulationTrace::with_capacity(steps);

    // Actuation delay line, pre-filled so the head pops zeros until the
    // first control samples have aged through.
    let mut delay_line: VecDeque<f64> = std::iter::repeat(0.0).take(delay_steps).collect();

    let mut y = 0.0;
    let mut integral = 0.0;
    let mut prev_error = 0.0;

    for i in 0..steps {
        let t = i as f64 * cfg.dt_s;
        let error = cfg.setpoint - y;

        integral += error * cfg.dt_s;
        let derivative = (error - prev_error) / cfg.dt_s;

        let u = (cfg.kp * error + cfg.ki * integral + cfg.kd * derivative)
            .clamp(CONTROL_MIN, CONTROL_MAX);

        // Pop before push: an empty line still delays actuation one step.
        let u_delayed = delay_line.pop_front().unwrap_or(0.0);
        delay_line.push_back(u);

        let dy = (PROCESS_GAIN * u_delayed - y) / PROCESS_TAU_S;
        y += dy * cfg.dt_s;

        trace.time_s.push(t);
        trace.output.push(y);
        trace.setpoint.push(cfg.setpoint);
        trace.error.push(error);
        trace.control.push(u);

        prev_error = error;
    }

    trace
}

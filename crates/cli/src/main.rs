use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sim::{simulate, SimulationConfig, SimulationTrace};
use tuning::{
    tune, ControllerType, CriticalPoint, PidGains, ProcessModel, ResponseStyle, TuningRequest,
};

#[derive(Parser, Debug)]
#[command(
    name = "pid-tuning-sim",
    version,
    about = "Classical PID tuning rules with a closed-loop response simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute PID gains from process characteristics
    Tune(TuneArgs),
    /// Simulate the reference process step response under given gains
    Simulate(SimulateArgs),
}

#[derive(Clone, Debug, ValueEnum)]
enum MethodArg {
    ZnOpen,
    ZnClosed,
    CohenCoon,
    Simc,
    TyreusLuyben,
    Chr,
}

#[derive(Clone, Debug, ValueEnum)]
enum ControllerArg {
    P,
    Pi,
    Pid,
}

impl From<ControllerArg> for ControllerType {
    fn from(c: ControllerArg) -> Self {
        match c {
            ControllerArg::P => ControllerType::P,
            ControllerArg::Pi => ControllerType::Pi,
            ControllerArg::Pid => ControllerType::Pid,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
enum StyleArg {
    /// Setpoint tracking, 0% overshoot
    Setpoint,
    /// Setpoint tracking, 20% overshoot
    Setpoint20,
    /// Load rejection, 0% overshoot
    Load,
    /// Load rejection, 20% overshoot
    Load20,
}

impl From<StyleArg> for ResponseStyle {
    fn from(s: StyleArg) -> Self {
        match s {
            StyleArg::Setpoint => ResponseStyle::Setpoint,
            StyleArg::Setpoint20 => ResponseStyle::Setpoint20,
            StyleArg::Load => ResponseStyle::Load,
            StyleArg::Load20 => ResponseStyle::Load20,
        }
    }
}

#[derive(Args, Debug)]
struct TuneArgs {
    #[arg(value_enum, long)]
    method: MethodArg,

    #[arg(value_enum, long, default_value = "pid")]
    controller: ControllerArg,

    /// Process gain K (zn-open, cohen-coon, simc, chr)
    #[arg(long)]
    gain: Option<f64>,

    /// Time constant tau in seconds (zn-open, cohen-coon, simc, chr)
    #[arg(long)]
    tau: Option<f64>,

    /// Dead time L in seconds (zn-open, cohen-coon, simc, chr)
    #[arg(long)]
    dead_time: Option<f64>,

    /// Ultimate gain Ku (zn-closed, tyreus-luyben)
    #[arg(long)]
    ku: Option<f64>,

    /// Ultimate period Tu in seconds (zn-closed, tyreus-luyben)
    #[arg(long)]
    tu: Option<f64>,

    /// Desired closed-loop time constant tau_c in seconds (simc)
    #[arg(long)]
    tau_c: Option<f64>,

    /// Target response shape (chr)
    #[arg(value_enum, long, default_value = "setpoint")]
    response: StyleArg,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Proportional gain
    #[arg(long, default_value_t = 1.0)]
    kp: f64,

    /// Integral gain (parallel form)
    #[arg(long, default_value_t = 0.5)]
    ki: f64,

    /// Derivative gain (parallel form)
    #[arg(long, default_value_t = 0.1)]
    kd: f64,

    #[arg(long, default_value_t = 1.0)]
    setpoint: f64,

    /// Fixed time step in seconds
    #[arg(long, default_value_t = 0.01)]
    dt: f64,

    /// Total simulation time in seconds
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,
}

#[derive(serde::Serialize)]
struct GainsRow {
    kp: f64,
    ti_s: Option<f64>,
    td_s: Option<f64>,
    ki: Option<f64>,
    kd: Option<f64>,
}

impl From<PidGains> for GainsRow {
    fn from(g: PidGains) -> Self {
        Self {
            kp: g.kp,
            ti_s: g.ti_s,
            td_s: g.td_s,
            ki: g.ki,
            kd: g.kd,
        }
    }
}

#[derive(serde::Serialize)]
struct TraceRow {
    t_s: f64,
    output: f64,
    setpoint: f64,
    error: f64,
    control: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Tune(args) => run_tune(args),
        Command::Simulate(args) => run_simulate(args),
    }
}

fn run_tune(args: TuneArgs) -> Result<()> {
    let controller = ControllerType::from(args.controller.clone());

    let req = match args.method {
        MethodArg::ZnOpen => TuningRequest::ZnOpen {
            model: model(&args)?,
            controller,
        },
        MethodArg::ZnClosed => TuningRequest::ZnClosed {
            critical: critical(&args)?,
            controller,
        },
        MethodArg::CohenCoon => TuningRequest::CohenCoon {
            model: model(&args)?,
            controller,
        },
        MethodArg::Simc => TuningRequest::Simc {
            model: model(&args)?,
            tau_c_s: positive("--tau-c", args.tau_c)?,
            controller,
        },
        MethodArg::TyreusLuyben => TuningRequest::TyreusLuyben {
            critical: critical(&args)?,
            controller,
        },
        MethodArg::Chr => TuningRequest::Chr {
            model: model(&args)?,
            style: args.response.clone().into(),
            controller,
        },
    };

    let gains = tune(&req)?;
    println!("{}", serde_json::to_string(&GainsRow::from(gains))?);

    Ok(())
}

fn run_simulate(args: SimulateArgs) -> Result<()> {
    for (name, v) in [("--kp", args.kp), ("--ki", args.ki), ("--kd", args.kd)] {
        if !v.is_finite() {
            bail!("{name} must be finite, got {v}");
        }
    }
    if !args.setpoint.is_finite() {
        bail!("--setpoint must be finite, got {}", args.setpoint);
    }
    if !(args.dt.is_finite() && args.dt > 0.0) {
        bail!("--dt must be a positive number of seconds, got {}", args.dt);
    }
    if !(args.seconds.is_finite() && args.seconds >= args.dt) {
        bail!(
            "--seconds must be at least one time step ({}), got {}",
            args.dt,
            args.seconds
        );
    }

    let cfg = SimulationConfig {
        kp: args.kp,
        ki: args.ki,
        kd: args.kd,
        setpoint: args.setpoint,
        dt_s: args.dt,
        horizon_s: args.seconds,
    };

    // One JSON object per step to stdout.
    let trace: SimulationTrace = simulate(&cfg);
    for i in 0..trace.len() {
        let row = TraceRow {
            t_s: trace.time_s[i],
            output: trace.output[i],
            setpoint: trace.setpoint[i],
            error: trace.error[i],
            control: trace.control[i],
        };
        println!("{}", serde_json::to_string(&row)?);
    }

    Ok(())
}

fn positive(name: &str, v: Option<f64>) -> Result<f64> {
    match v {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(v) => bail!("{name} must be a positive number, got {v}"),
        None => bail!("{name} is required for this method"),
    }
}

fn model(args: &TuneArgs) -> Result<ProcessModel> {
    Ok(ProcessModel {
        gain: positive("--gain", args.gain)?,
        tau_s: positive("--tau", args.tau)?,
        dead_time_s: positive("--dead-time", args.dead_time)?,
    })
}

fn critical(args: &TuneArgs) -> Result<CriticalPoint> {
    Ok(CriticalPoint {
        ku: positive("--ku", args.ku)?,
        tu_s: positive("--tu", args.tu)?,
    })
}

use chrono::Local;
use crate::{
    control::LoopPhase,
    error::{AppError, Kind},
    logger::RunLog,
    options::Options,
};

#[derive(Debug, Clone)]
pub struct App {
    opts: Options,
    version: String,
    log: RunLog,
}

impl App {
    pub fn new(opts: &Options) -> Self {
        let app_log = match opts.save_log {
            true => {
                let time_stamp = Local::now().format("%Y-%m%d_%H%M%S").to_string();
                Some(format!("{}\\rolling-bfi_{}.log", &opts.work_dir, &time_stamp))
            },
            false => None,
        };
        let version = format!(
            "{} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );

        Self {
            opts: opts.clone(),
            version,
            log: RunLog::new(app_log),
        }
    }

    /// Runs until the control window is closed. Returns the exit code carried
    /// by the quit request.
    pub fn proceed(&self) -> Result<i32, AppError> {
        self.log.log(&self.version, false);

        if self.opts.print_help {
            self.log.log(&format!("\n{}", Options::help()), false);
            return Err(AppError::new(Kind::InvalidFlags));
        }

        self.log.log(&format!("{:?}", LoopPhase::Initializing), true);
        self.start()
    }

    #[cfg(windows)]
    fn start(&self) -> Result<i32, AppError> {
        use crate::{
            control::ControlLoop,
            platform::{adapter::Adapter, display, overlay::{MessagePump, Surfaces}},
            sync::Synchronizer,
        };

        if let Err(e) = display::raise_thread_priority() {
            self.log.log(&format!("thread priority unchanged: {}", e), true);
        }
        // the embedded manifest normally sets this already
        let _ = display::set_dpiawareness_v2();

        let screen = display::screen_geometry();
        let state = crate::scan::ScanState::new(screen);
        self.log_geometry(&state);

        let surfaces = Surfaces::create(screen)?;
        let adapter = Adapter::open(surfaces.main())?;

        self.log.log(&format!("{:?}", LoopPhase::Running), true);
        let control = ControlLoop::new(
            Synchronizer::new(adapter, self.opts.poll_interval),
            surfaces,
            MessagePump,
            state,
            self.log.clone(),
        );
        let report = control.run();
        self.log.log(
            &format!("{:?} with exit code {}", report.phase, report.exit_code),
            true,
        );
        Ok(report.exit_code)
    }

    #[cfg(not(windows))]
    fn start(&self) -> Result<i32, AppError> {
        Err(AppError::new(Kind::UnsupportedPlatform))
    }

    #[cfg(windows)]
    fn log_geometry(&self, state: &crate::scan::ScanState) {
        let screen = state.screen();
        self.log.log(
            &format!(
                "screen {}x{}, band {} rows, step {} rows, period {} frames, poll {}us",
                screen.width,
                screen.height,
                state.scan_height(),
                state.step(),
                state.period(),
                self.opts.poll_interval.as_micros(),
            ),
            true,
        );
    }

    /// Logs a fatal startup error and shows it in a blocking dialog.
    pub fn report(&self, e: &AppError) {
        self.log.log(&e.to_string(), true);
        #[cfg(windows)]
        let _ = crate::platform::dialog::pop_error(&Self::dialog_text(e));
    }

    /// There is no console in a GUI subsystem build, so bad flags get the
    /// usage text in the dialog.
    fn dialog_text(e: &AppError) -> String {
        match e.kind() {
            Kind::InvalidFlags => format!("{}\n\n{}", e.description(), Options::help()),
            _ => e.description(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_request_fails_with_invalid_flags() {
        let opts = Options { print_help: true, ..Default::default() };
        let err = App::new(&opts).proceed().unwrap_err();
        assert_eq!(*err.kind(), Kind::InvalidFlags);
        assert_eq!(err.code(), 101);
    }

    #[test]
    fn version_names_the_package() {
        let app = App::new(&Options::default());
        assert!(app.version.starts_with("rolling-bfi "));
    }

    #[test]
    fn bad_flags_dialog_carries_usage() {
        let text = App::dialog_text(&AppError::new(Kind::InvalidFlags));
        assert!(text.starts_with("Invalid Flags\n\n"), "{}", text);
        assert!(text.ends_with(&Options::help()));
        let text = App::dialog_text(&AppError::new(Kind::AdapterOutOfMemory));
        assert_eq!(text, AppError::new(Kind::AdapterOutOfMemory).description());
    }

    #[cfg(not(windows))]
    #[test]
    fn other_platforms_are_rejected() {
        let err = App::new(&Options::default()).proceed().unwrap_err();
        assert_eq!(*err.kind(), Kind::UnsupportedPlatform);
    }
}

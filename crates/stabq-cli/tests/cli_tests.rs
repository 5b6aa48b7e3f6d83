//! CLI command parsing and helper tests.
//!
//! The CLI is a binary crate, so parsing is checked through an equivalent
//! clap definition and the helpers through the library calls they wrap.

// ============================================================================
// Flag helpers
// ============================================================================

mod flag_helpers {
    use stabq_codes::{CodeKind, Experiment, InjectedError};
    use helpers::parse_error_flag;

    /// Equivalent to commands::common::parse_error_flag
    mod helpers {
        use stabq_codes::InjectedError;

        pub fn parse_error_flag(value: &str) -> anyhow::Result<Option<InjectedError>> {
            if value.trim().eq_ignore_ascii_case("none") {
                return Ok(None);
            }
            value
                .parse()
                .map(Some)
                .map_err(|e: String| anyhow::anyhow!(e))
        }
    }

    #[test]
    fn test_error_flag_none() {
        assert_eq!(parse_error_flag("none").unwrap(), None);
        assert_eq!(parse_error_flag("NONE").unwrap(), None);
    }

    #[test]
    fn test_error_flag_pauli() {
        let e = parse_error_flag("y:8").unwrap().unwrap();
        assert_eq!(e.to_string(), "y:8");
    }

    #[test]
    fn test_error_flag_invalid() {
        let err = parse_error_flag("x").unwrap_err();
        assert!(err.to_string().contains("<pauli>:<qubit>"));
    }

    #[test]
    fn test_demo_is_the_flagless_default() {
        let exp = Experiment::demo(CodeKind::BitFlip);
        assert_eq!(exp.error, Some("x:1".parse::<InjectedError>().unwrap()));
    }
}

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use clap::{Parser, Subcommand};
    use stabq_codes::{CodeKind, InitialState};

    #[derive(Parser)]
    #[command(name = "stabq")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Run {
            #[arg(short, long, required_unless_present = "config")]
            code: Option<CodeKind>,
            #[arg(short, long)]
            initial: Option<InitialState>,
            #[arg(short, long)]
            error: Option<String>,
            #[arg(short, long)]
            seed: Option<u64>,
            #[arg(long)]
            config: Option<String>,
            #[arg(short, long, default_value = "table")]
            format: String,
        },
        Circuit {
            #[arg(short, long)]
            code: CodeKind,
            #[arg(short, long)]
            initial: Option<InitialState>,
            #[arg(short, long)]
            error: Option<String>,
            #[arg(short, long, default_value = "text")]
            format: String,
        },
        Version,
    }

    #[test]
    fn test_run_defaults() {
        let cli = TestCli::try_parse_from(["stabq", "run", "--code", "shor"]).unwrap();
        match cli.command {
            TestCommands::Run {
                code,
                initial,
                error,
                seed,
                config,
                format,
            } => {
                assert_eq!(code, Some(CodeKind::Shor));
                assert!(initial.is_none());
                assert!(error.is_none());
                assert!(seed.is_none());
                assert!(config.is_none());
                assert_eq!(format, "table");
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_all_flags() {
        let cli = TestCli::try_parse_from([
            "stabq", "run", "-c", "bit-flip", "-i", "minus", "-e", "x:2", "-s", "7", "-f",
            "json",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Run {
                code,
                initial,
                error,
                seed,
                format,
                ..
            } => {
                assert_eq!(code, Some(CodeKind::BitFlip));
                assert_eq!(initial, Some(InitialState::Minus));
                assert_eq!(error.as_deref(), Some("x:2"));
                assert_eq!(seed, Some(7));
                assert_eq!(format, "json");
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_config_replaces_code() {
        let cli = TestCli::try_parse_from(["stabq", "run", "--config", "exp.yaml"]).unwrap();
        match cli.command {
            TestCommands::Run { code, config, .. } => {
                assert!(code.is_none());
                assert_eq!(config.as_deref(), Some("exp.yaml"));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_run_requires_code_or_config() {
        assert!(TestCli::try_parse_from(["stabq", "run"]).is_err());
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(TestCli::try_parse_from(["stabq", "run", "--code", "steane"]).is_err());
        assert!(TestCli::try_parse_from(["stabq", "circuit", "--code", "surface"]).is_err());
    }

    #[test]
    fn test_circuit_command() {
        let cli =
            TestCli::try_parse_from(["stabq", "circuit", "--code", "shor", "--error", "none"])
                .unwrap();
        match cli.command {
            TestCommands::Circuit {
                code,
                error,
                format,
                ..
            } => {
                assert_eq!(code, CodeKind::Shor);
                assert_eq!(error.as_deref(), Some("none"));
                assert_eq!(format, "text");
            }
            _ => panic!("Expected Circuit command"),
        }
    }

    #[test]
    fn test_version_and_verbosity() {
        let cli = TestCli::try_parse_from(["stabq", "version"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(matches!(cli.command, TestCommands::Version));

        let cli = TestCli::try_parse_from(["stabq", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}

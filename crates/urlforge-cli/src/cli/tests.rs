use super::commands::{run_build, BuildArgs};
use super::*;
use urlforge_core::config::UrlforgeConfig;
use urlforge_core::ParameterValue;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

fn args(parts: &[&str], params: &[&str]) -> BuildArgs {
    BuildArgs {
        parts: parts.iter().map(|s| s.to_string()).collect(),
        params: params.iter().map(|s| s.to_string()).collect(),
        ..BuildArgs::default()
    }
}

#[test]
fn cli_parse_build() {
    match parse(&["urlforge", "build", "https://h/", "a/:id", "-p", "id=5", "--param", "t[]=x"]) {
        CliCommand::Build {
            parts,
            params,
            params_json,
            no_defaults,
        } => {
            assert_eq!(parts, vec!["https://h/", "a/:id"]);
            assert_eq!(params, vec!["id=5", "t[]=x"]);
            assert!(params_json.is_none());
            assert!(!no_defaults);
        }
        _ => panic!("expected Build"),
    }
}

#[test]
fn cli_parse_build_json_and_no_defaults() {
    match parse(&["urlforge", "build", "a", "--params-json", "{\"x\":1}", "--no-defaults"]) {
        CliCommand::Build {
            params_json,
            no_defaults,
            ..
        } => {
            assert_eq!(params_json.as_deref(), Some("{\"x\":1}"));
            assert!(no_defaults);
        }
        _ => panic!("expected Build"),
    }
}

#[test]
fn cli_parse_build_requires_a_part() {
    assert!(Cli::try_parse_from(["urlforge", "build"]).is_err());
}

#[test]
fn cli_parse_config() {
    match parse(&["urlforge", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}

#[test]
fn build_with_placeholders_and_params() {
    let cfg = UrlforgeConfig::default();
    let url = run_build(
        &cfg,
        args(&["https://h/", "a/:id"], &["id=1", "other=2", "t[]=x y", "t[]=z"]),
    )
    .unwrap();
    assert_eq!(url, "https://h/a/1?other=2&t[]=x%20y&t[]=z");
}

#[test]
fn build_applies_config_defaults() {
    let mut cfg = UrlforgeConfig {
        base_url: Some("https://api.example.com/".into()),
        ..UrlforgeConfig::default()
    };
    cfg.parameters.insert("lang".into(), ParameterValue::from("en"));
    cfg.parameters.insert("page".into(), ParameterValue::from(1));

    let url = run_build(&cfg, args(&["users"], &["page=3"])).unwrap();
    assert_eq!(url, "https://api.example.com/users?lang=en&page=3");

    let bare = BuildArgs {
        no_defaults: true,
        ..args(&["users"], &[])
    };
    assert_eq!(run_build(&cfg, bare).unwrap(), "users");
}

#[test]
fn build_params_json_then_flags() {
    let cfg = UrlforgeConfig::default();
    let with_json = BuildArgs {
        params_json: Some(r#"{"id": 7, "q": "a", "tags": ["x", "y"]}"#.into()),
        ..args(&["/items/:id"], &["q=b"])
    };
    assert_eq!(
        run_build(&cfg, with_json).unwrap(),
        "/items/7?q=b&tags[]=x&tags[]=y"
    );
}

#[test]
fn build_rejects_bad_params() {
    let cfg = UrlforgeConfig::default();
    assert!(run_build(&cfg, args(&["a"], &["novalue"])).is_err());
    assert!(run_build(&cfg, args(&["a"], &["k=1", "k[]=2"])).is_err());

    let bad_json = BuildArgs {
        params_json: Some("[1, 2]".into()),
        ..args(&["a"], &[])
    };
    assert!(run_build(&cfg, bad_json).is_err());
}

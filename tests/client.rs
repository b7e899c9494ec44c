use optparams::{
    apply, default, default_with, join, Error, FailFast, Func, OptionError, OptionResultExt,
};

#[derive(Debug, Default, PartialEq)]
struct Client {
    endpoint: String,
    timeout_secs: u64,
    api_token: String,
}

const DEFAULT_ENDPOINT: &str = "https://example.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn new_client(api_token: &str, mut opts: Vec<Func<'_, Client>>) -> optparams::Result<Client> {
    let mut client = Client {
        api_token: api_token.to_owned(),
        ..Client::default()
    };

    opts.push(default(|c: &mut Client| Some(&mut c.endpoint), DEFAULT_ENDPOINT.to_owned()));
    opts.push(default(|c: &mut Client| Some(&mut c.timeout_secs), DEFAULT_TIMEOUT_SECS));

    apply(&mut client, opts)?;
    Ok(client)
}

fn with_endpoint(url: &str) -> Func<'static, Client> {
    let url = url.to_owned();
    Func::new(move |c: &mut Client| {
        if url.is_empty() {
            return Err("endpoint is empty");
        }
        c.endpoint = url;
        Ok(())
    })
}

fn with_timeout(raw: &str) -> Func<'static, Client> {
    let raw = raw.to_owned();
    Func::new(move |c: &mut Client| {
        c.timeout_secs = raw.parse::<u64>().context("invalid timeout")?;
        Ok::<(), optparams::BoxError>(())
    })
}

fn with_required_token() -> Func<'static, Client> {
    Func::new(|c: &mut Client| {
        if c.api_token.is_empty() {
            return Err(FailFast::caused_by("api token is required"));
        }
        Ok(())
    })
}

#[test]
fn test_caller_option_wins_over_default() {
    let client = new_client("token", vec![with_endpoint("https://internal.example.com")]).unwrap();

    assert_eq!(
        client,
        Client {
            endpoint: "https://internal.example.com".into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_token: "token".into(),
        }
    );
}

#[test]
fn test_defaults_fill_everything_unset() {
    let client = new_client("token", vec![]).unwrap();

    assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(client.timeout_secs, DEFAULT_TIMEOUT_SECS);
}

#[test]
fn test_soft_errors_are_all_reported() {
    let err = new_client("token", vec![with_endpoint(""), with_timeout("soon")]).unwrap_err();

    let errors = err.errors().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(!err.is_fail_fast());

    let message = err.to_string();
    assert!(message.starts_with("endpoint is empty\ninvalid timeout: "));
    assert!(matches!(err.find::<OptionError>(), Some(OptionError::Context { .. })));
}

#[test]
fn test_fail_fast_skips_remaining_options_and_defaults() {
    let err = new_client("", vec![with_required_token(), with_endpoint("")]).unwrap_err();

    assert!(err.is_fail_fast());
    assert_eq!(err.errors().map(|e| e.len()), Some(1));
    assert_eq!(err.to_string(), "fail fast: api token is required");
}

#[test]
fn test_escalation_through_context_and_result_ext() {
    let opts = vec![
        Func::new(|c: &mut Client| {
            c.endpoint = "https://partial.example.com".into();
            Ok::<(), optparams::BoxError>(())
        }),
        Func::new(|_: &mut Client| {
            "x".parse::<u64>().fail_fast().context("loading timeout")?;
            Ok::<(), optparams::BoxError>(())
        }),
    ];
    let mut client = Client::default();

    let err = apply(&mut client, opts).unwrap_err();

    assert!(err.is_fail_fast());
    assert!(err.find::<std::num::ParseIntError>().is_some());
    assert_eq!(client.endpoint, "https://partial.example.com");
}

#[test]
fn test_grouped_options_behave_like_inlined_ones() {
    let staging = || join([with_endpoint("https://staging.example.com"), with_timeout("5")]);

    let client = new_client("token", vec![staging()]).unwrap();
    assert_eq!(client.endpoint, "https://staging.example.com");
    assert_eq!(client.timeout_secs, 5);

    let err = new_client("", vec![join([with_required_token(), staging()])]).unwrap_err();
    assert!(err.is_fail_fast());
}

#[test]
fn test_lazy_default_for_derived_field() {
    let mut client = Client {
        api_token: "token".into(),
        ..Client::default()
    };
    let opts = vec![
        with_endpoint("https://example.org"),
        // Later defaults observe what earlier options set.
        default_with(
            |c: &mut Client| Some(&mut c.timeout_secs),
            || DEFAULT_TIMEOUT_SECS * 2,
        ),
    ];

    apply(&mut client, opts).unwrap();
    assert_eq!(client.timeout_secs, 60);
}

#[test]
fn test_nil_receiver() {
    let err = apply(None::<&mut Client>, vec![with_endpoint("https://example.com")]).unwrap_err();
    assert!(matches!(err, Error::NilReceiver { .. }));
    assert!(err.errors().is_none());
}

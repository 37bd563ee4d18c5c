// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `padescheck`: a thin CLI over the `pades-verify` library. Argument
//! parsing and JSON printing only — every real decision is the library's.

use {
    clap::{Arg, ArgMatches, Command},
    log::LevelFilter,
    pades_verify::{
        cert_path::{CertificatePathValidator, PathValidationError, ValidatedPath},
        error::PadesError,
        pdf::parser::{ParsedRevision, PdfDocumentParser},
        svt::issuer::{IssuerPolicy, SvtIssuerKey},
        IssuerConfig, Verifier, VerifierConfig,
    },
};

/// A [`PdfDocumentParser`] that cannot parse anything. Real COS parsing
/// (xref streams, object streams, filter decompression) is out of scope
/// for this crate (spec.md §1) — a production `padescheck` binary would
/// plug in a real PDF object-stream library here.
struct UnimplementedPdfParser;

impl PdfDocumentParser for UnimplementedPdfParser {
    fn parse_revision(&self, _bytes: &[u8]) -> Result<ParsedRevision, PadesError> {
        Err(PadesError::BadPdf(
            "no PDF object-stream parser is wired into this binary".into(),
        ))
    }
}

/// A [`CertificatePathValidator`] that trusts every signer certificate
/// directly, treating the signature's own chain as already validated.
/// Real deployments inject a validator backed by a trust store and
/// CRL/OCSP fetches; this one exists only so the CLI has something to
/// pass in without pulling in a full PKI stack.
struct TrustEverythingPathValidator;

impl CertificatePathValidator for TrustEverythingPathValidator {
    fn validate(
        &self,
        signer: &pades_cms::Certificate,
        chain: &[pades_cms::Certificate],
        _at_time: chrono::DateTime<chrono::Utc>,
    ) -> Result<ValidatedPath, PathValidationError> {
        let mut path = vec![signer.clone()];
        path.extend(chain.iter().cloned());
        Ok(ValidatedPath {
            path,
            revocation_checked: false,
        })
    }
}

fn command_verify(args: &ArgMatches) -> anyhow::Result<()> {
    let path: &str = args.value_of("path").ok_or(PadesError::NoSignatures)?;
    let bytes = std::fs::read(path)?;

    let config: VerifierConfig = match args.value_of("config") {
        Some(path) => serde_json::from_slice(&std::fs::read(path)?)?,
        None => VerifierConfig::default(),
    };

    let parser = UnimplementedPdfParser;
    let path_validator = TrustEverythingPathValidator;
    let verifier = Verifier::new(&parser, &path_validator, config);

    let document = verifier.validate_and_aggregate(&bytes)?;
    serde_json::to_writer_pretty(std::io::stdout(), &document)?;
    println!();

    Ok(())
}

fn command_is_signed(args: &ArgMatches) -> anyhow::Result<()> {
    let path: &str = args.value_of("path").ok_or(PadesError::NoSignatures)?;
    let bytes = std::fs::read(path)?;

    let parser = UnimplementedPdfParser;
    let path_validator = TrustEverythingPathValidator;
    let verifier = Verifier::new(&parser, &path_validator, VerifierConfig::default());

    println!("{}", verifier.is_signed(&bytes)?);
    Ok(())
}

fn command_issue_svt(args: &ArgMatches) -> anyhow::Result<()> {
    let pdf_path: &str = args.value_of("path").ok_or(PadesError::NoSignatures)?;
    let key_path: &str = args.value_of("key").ok_or(PadesError::NoSigningCertificate)?;
    let cert_path: &str = args.value_of("cert").ok_or(PadesError::NoSigningCertificate)?;
    let config_path: &str = args.value_of("config").ok_or(PadesError::NoSigningCertificate)?;
    let signature_index: usize = args
        .value_of("signature-index")
        .unwrap_or("0")
        .parse()
        .map_err(|_| PadesError::InternalInvariantViolation("signature-index is not a number"))?;

    let pdf_bytes = std::fs::read(pdf_path)?;
    let config: IssuerConfig = serde_json::from_slice(&std::fs::read(config_path)?)?;

    let private_key_der = std::fs::read(key_path)?;
    let certificate = pades_cms::Certificate::from_der(&std::fs::read(cert_path)?)?;

    let issuer = SvtIssuerKey::from_der(&private_key_der, certificate, Vec::new())?;
    let policy = IssuerPolicy {
        default_basic_validation: config.default_basic_validation,
        issuer_name: config.issuer_name,
    };

    let parser = UnimplementedPdfParser;
    let path_validator = TrustEverythingPathValidator;
    let verifier = Verifier::new(&parser, &path_validator, VerifierConfig::default());

    let now = chrono::Utc::now().timestamp();
    let jti = uuid::Uuid::new_v4().to_string();

    let (_claims, jws) = verifier.issue_svt_for_signature(
        &pdf_bytes,
        signature_index,
        &issuer,
        &policy,
        now,
        jti,
    )?;

    println!("{jws}");
    Ok(())
}

fn main_impl() -> anyhow::Result<()> {
    let app = Command::new("padescheck")
        .about("PAdES/SVT PDF signature validation")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .multiple_occurrences(true)
                .global(true)
                .help("Increase logging verbosity"),
        )
        .subcommand(
            Command::new("verify")
                .about("Validate every signature in a PDF and print the aggregated result")
                .arg(Arg::new("path").required(true).help("Path to the PDF"))
                .arg(
                    Arg::new("config")
                        .long("config")
                        .takes_value(true)
                        .help("Path to a VerifierConfig JSON file"),
                ),
        )
        .subcommand(
            Command::new("is-signed")
                .about("Print whether a PDF contains at least one content signature")
                .arg(Arg::new("path").required(true).help("Path to the PDF")),
        )
        .subcommand(
            Command::new("issue-svt")
                .about("Validate a signature in a PDF and issue a Signature Validation Token for it")
                .arg(Arg::new("path").required(true).help("Path to the PDF"))
                .arg(
                    Arg::new("signature-index")
                        .long("signature-index")
                        .takes_value(true)
                        .default_value("0")
                        .help("Index (document order) of the content signature to issue an SVT for"),
                )
                .arg(
                    Arg::new("key")
                        .long("key")
                        .takes_value(true)
                        .required(true)
                        .help("Path to the issuer's DER-encoded private key"),
                )
                .arg(
                    Arg::new("cert")
                        .long("cert")
                        .takes_value(true)
                        .required(true)
                        .help("Path to the issuer's DER-encoded certificate"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .takes_value(true)
                        .required(true)
                        .help("Path to an IssuerConfig JSON file"),
                ),
        );

    let matches = app.get_matches();

    let log_level = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level.as_str()))
        .init();

    match matches.subcommand() {
        Some(("verify", args)) => command_verify(args),
        Some(("is-signed", args)) => command_is_signed(args),
        Some(("issue-svt", args)) => command_issue_svt(args),
        _ => Err(anyhow::anyhow!("no subcommand given; see --help")),
    }
}

fn main() {
    let exit_code = match main_impl() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {err}");
            1
        }
    };

    std::process::exit(exit_code)
}

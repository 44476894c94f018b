//! `encrypt` and `decrypt` commands.
//!
//! Inputs are read fully into memory, transformed by `vellum_core`, and
//! written atomically. A directory input processes every regular file
//! directly inside it (no recursion). Empty files in a directory are skipped
//! with a warning; a file that fails does not stop the batch, and the first
//! failure sets the exit status once every file has been tried.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroizing;

use vellum_core::fs::{directory_exists, enumerate_directory, file_exists, mkdir_if_not_exists};

use crate::app::AppContext;
use crate::cli::CryptArgs;
use crate::errors::CliError;
use crate::passphrase::{resolve_passphrase, resolve_salt, Purpose};

const STDIO: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

impl Mode {
    fn purpose(self) -> Purpose {
        match self {
            Mode::Encrypt => Purpose::Encrypt,
            Mode::Decrypt => Purpose::Decrypt,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Mode::Encrypt => "Encrypted",
            Mode::Decrypt => "Decrypted",
        }
    }
}

/// Everything needed to transform one buffer.
struct Job<'a> {
    mode: Mode,
    passphrase: &'a SecretString,
    salt: &'a str,
    base64: bool,
}

impl Job<'_> {
    fn run(&self, input: &[u8], label: &str) -> anyhow::Result<Zeroizing<Vec<u8>>> {
        let passphrase = self.passphrase.expose_secret();
        match self.mode {
            Mode::Encrypt => {
                let envelope = vellum_core::encrypt(input, passphrase, self.salt)
                    .map_err(|e| CliError::from_core(e, label))?;
                if self.base64 {
                    let mut text = STANDARD.encode(&envelope);
                    text.push('\n');
                    Ok(Zeroizing::new(text.into_bytes()))
                } else {
                    Ok(Zeroizing::new(envelope))
                }
            }
            Mode::Decrypt => {
                let decoded;
                let envelope = if self.base64 {
                    let text = std::str::from_utf8(input).map_err(|_| {
                        CliError::invalid_input(format!("{}: base64 input is not text", label))
                    })?;
                    decoded = STANDARD.decode(text.trim()).map_err(|e| {
                        CliError::invalid_input(format!("{}: invalid base64: {}", label, e))
                    })?;
                    decoded.as_slice()
                } else {
                    input
                };
                let plaintext = vellum_core::decrypt(envelope, passphrase, self.salt)
                    .map_err(|e| CliError::from_core(e, label))?;
                Ok(Zeroizing::new(plaintext))
            }
        }
    }
}

pub fn handle_encrypt(ctx: &AppContext, args: &CryptArgs) -> anyhow::Result<()> {
    handle(ctx, args, Mode::Encrypt)
}

pub fn handle_decrypt(ctx: &AppContext, args: &CryptArgs) -> anyhow::Result<()> {
    handle(ctx, args, Mode::Decrypt)
}

fn handle(ctx: &AppContext, args: &CryptArgs, mode: Mode) -> anyhow::Result<()> {
    let salt = resolve_salt(args.salt.as_deref(), &ctx.config)?;

    if args.input == STDIO {
        // stdin carries the data, so there is nothing to prompt on.
        let passphrase = resolve_passphrase(mode.purpose(), true)?;
        let job = Job {
            mode,
            passphrase: &passphrase,
            salt: &salt,
            base64: args.base64,
        };
        return run_stdin(&job, args);
    }

    let input = PathBuf::from(&args.input);
    if directory_exists(&input)? {
        let passphrase = resolve_passphrase(mode.purpose(), args.no_input)?;
        let job = Job {
            mode,
            passphrase: &passphrase,
            salt: &salt,
            base64: args.base64,
        };
        return run_directory(ctx, &job, args, &input);
    }
    if !file_exists(&input)? {
        return Err(CliError::not_found(
            format!("Input not found: {}", input.display()),
            "Hint: Check the path, or pass `-` to read from stdin.",
        )
        .into());
    }

    let passphrase = resolve_passphrase(mode.purpose(), args.no_input)?;
    let job = Job {
        mode,
        passphrase: &passphrase,
        salt: &salt,
        base64: args.base64,
    };
    run_file(ctx, &job, args, &input)
}

fn run_stdin(job: &Job<'_>, args: &CryptArgs) -> anyhow::Result<()> {
    let mut input = Zeroizing::new(Vec::new());
    std::io::stdin()
        .read_to_end(&mut input)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    tracing::debug!(bytes = input.len(), "read stdin");

    let output = job.run(&input, "stdin")?;
    match args.output.as_deref() {
        None | Some(STDIO) => write_stdout(&output),
        Some(path) => write_output(Path::new(path), &output, args.force),
    }
}

fn run_file(ctx: &AppContext, job: &Job<'_>, args: &CryptArgs, input: &Path) -> anyhow::Result<()> {
    let extension = ctx.config.extension();
    let output = match args.output.as_deref() {
        Some(STDIO) => None,
        Some(path) => Some(PathBuf::from(path)),
        None => Some(default_output(input, job.mode, extension)),
    };

    let data = read_input(input)?;
    let label = input.display().to_string();
    let transformed = job.run(&data, &label)?;

    match output {
        None => write_stdout(&transformed)?,
        Some(path) => {
            write_output(&path, &transformed, args.force)?;
            tracing::info!(
                input = %input.display(),
                output = %path.display(),
                bytes = transformed.len(),
                "{}",
                job.mode.verb().to_lowercase()
            );
            if !ctx.quiet {
                println!("{} {} -> {}", job.mode.verb(), input.display(), path.display());
            }
        }
    }
    Ok(())
}

fn run_directory(
    ctx: &AppContext,
    job: &Job<'_>,
    args: &CryptArgs,
    input: &Path,
) -> anyhow::Result<()> {
    let extension = ctx.config.extension();
    let output_dir = match args.output.as_deref() {
        Some(STDIO) => {
            return Err(CliError::invalid_input(
                "Cannot write a directory of files to stdout; pass an output directory.",
            )
            .into())
        }
        Some(path) => PathBuf::from(path),
        None => input.to_path_buf(),
    };
    mkdir_if_not_exists(&output_dir)?;

    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut failures = Vec::new();
    for name in enumerate_directory(input)? {
        let source = input.join(&name);
        if !file_exists(&source)? || !selects(&name, job.mode, extension) {
            tracing::debug!(entry = %name, "skipped");
            continue;
        }

        let target = output_dir.join(output_name(&name, job.mode, extension));
        match process_file(job, &source, &target, args.force) {
            Ok(Some(bytes)) => {
                tracing::info!(
                    input = %source.display(),
                    output = %target.display(),
                    bytes,
                    "{}",
                    job.mode.verb().to_lowercase()
                );
                processed += 1;
            }
            Ok(None) => {
                tracing::warn!(input = %source.display(), "skipped empty file");
                skipped += 1;
            }
            Err(err) => {
                tracing::warn!(input = %source.display(), error = %err, "failed");
                failures.push(err);
            }
        }
    }

    if !ctx.quiet {
        println!(
            "{} {} file(s) from {} into {}",
            job.mode.verb(),
            processed,
            input.display(),
            output_dir.display()
        );
        if skipped > 0 {
            println!("Skipped {} empty file(s)", skipped);
        }
        if !failures.is_empty() {
            println!("Failed on {} file(s)", failures.len());
        }
    }

    // The first failure decides the exit code; the rest are reported here.
    let mut failures = failures.into_iter();
    match failures.next() {
        None => Ok(()),
        Some(first) => {
            for err in failures {
                eprintln!("Error: {:#}", err);
            }
            Err(first)
        }
    }
}

/// Transform one file of a directory batch. Empty files yield `Ok(None)`.
fn process_file(
    job: &Job<'_>,
    source: &Path,
    target: &Path,
    force: bool,
) -> anyhow::Result<Option<usize>> {
    let data = read_input(source)?;
    if data.is_empty() {
        return Ok(None);
    }
    let transformed = job.run(&data, &source.display().to_string())?;
    write_output(target, &transformed, force)?;
    Ok(Some(transformed.len()))
}

/// Encrypt picks files not yet carrying the extension; decrypt picks the rest.
fn selects(name: &str, mode: Mode, extension: &str) -> bool {
    let encrypted = has_extension(name, extension);
    match mode {
        Mode::Encrypt => !encrypted,
        Mode::Decrypt => encrypted,
    }
}

fn has_extension(name: &str, extension: &str) -> bool {
    name.len() > extension.len() + 1
        && name.ends_with(extension)
        && name[..name.len() - extension.len()].ends_with('.')
}

/// `notes.txt` -> `notes.txt.vlm` on encrypt; `notes.txt.vlm` -> `notes.txt`
/// on decrypt, or `name.out` when the extension is missing.
fn output_name(name: &str, mode: Mode, extension: &str) -> String {
    match mode {
        Mode::Encrypt => format!("{}.{}", name, extension),
        Mode::Decrypt if has_extension(name, extension) => {
            name[..name.len() - extension.len() - 1].to_string()
        }
        Mode::Decrypt => format!("{}.out", name),
    }
}

fn default_output(input: &Path, mode: Mode, extension: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(output_name(&name, mode, extension))
}

fn read_input(path: &Path) -> anyhow::Result<Zeroizing<Vec<u8>>> {
    let data = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read input");
    Ok(Zeroizing::new(data))
}

fn write_output(path: &Path, contents: &[u8], force: bool) -> anyhow::Result<()> {
    if file_exists(path)? && !force {
        return Err(CliError::invalid_input(format!(
            "Output already exists: {} (use --force to overwrite)",
            path.display()
        ))
        .into());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        mkdir_if_not_exists(parent)?;
    }
    vellum_core::fs::write_atomic(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))
}

fn write_stdout(contents: &[u8]) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(contents)
        .and_then(|_| stdout.flush())
        .map_err(|e| anyhow::anyhow!("Failed to write stdout: {}", e))
}

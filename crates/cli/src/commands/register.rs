//! Interactive register.
//!
//! Reads one command per line from stdin and re-renders the register view
//! after each one. Notices (confirmations and errors) are printed as
//! `! <message>` lines above the view.
//!
//! # Commands
//!
//! | input                    | action                                 |
//! |--------------------------|----------------------------------------|
//! | `4901234567894`          | set the code field (digits are kept)   |
//! | `code <text>` / `c`      | set the code field                     |
//! | `lookup` / `l`           | look the product up                    |
//! | `add` / `a`              | add the displayed product to the list  |
//! | `checkout` / `buy`       | submit the list                        |
//! | `list` / `ls`            | redraw                                 |
//! | `clear`                  | empty the code field                   |
//! | `help` / `h` / `?`       | show this table                        |
//! | `quit` / `q` / `exit`    | leave                                  |

use std::io::{self, Write};

use pos_register::{PosApiClient, PosBackend, PurchaseEntry, RegisterConfig, display};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::CommandError;

const PROMPT: &str = "> ";

const HELP: &str = "\
commands:
  <digits>          set the product code
  code <text>       set the product code
  lookup, l         look the product up
  add, a            add the product to the purchase list
  checkout, buy     complete the purchase
  list, ls          redraw
  clear             empty the product code
  help, h, ?        show this help
  quit, q, exit     leave the register";

/// A parsed line of register input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Code(String),
    Lookup,
    Add,
    List,
    Checkout,
    Clear,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    /// Parse one input line.
    ///
    /// A line starting with a digit is taken as a code, which is what a
    /// barcode scanner in keyboard mode produces.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        if line.starts_with(|c: char| c.is_ascii_digit()) {
            return Self::Code(line.to_string());
        }

        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(head, rest)| (head, rest.trim()));

        match head.to_ascii_lowercase().as_str() {
            "code" | "c" => Self::Code(rest.to_string()),
            "lookup" | "l" => Self::Lookup,
            "add" | "a" => Self::Add,
            "list" | "ls" => Self::List,
            "checkout" | "buy" => Self::Checkout,
            "clear" => Self::Clear,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Run the interactive register on stdin/stdout.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created or the terminal
/// cannot be read or written.
pub async fn run(config: &RegisterConfig) -> Result<(), CommandError> {
    let client = PosApiClient::new(config)?;
    tracing::info!(api = %config.api_url, "Register started");

    let mut entry = PurchaseEntry::new(client);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    register_loop(&mut entry, stdin, &mut stdout).await?;

    tracing::info!(
        pending_items = entry.purchases().len(),
        "Register closed"
    );
    Ok(())
}

/// Drive `entry` from `input` until it ends or a quit command arrives.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `out` fails.
pub async fn register_loop<B, R, W>(
    entry: &mut PurchaseEntry<B>,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    B: PosBackend,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", entry.view())?;
    prompt(out)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if !step(entry, Command::parse(&line), out).await? {
            break;
        }
        prompt(out)?;
    }

    Ok(())
}

/// Apply one command. Returns `false` when the register should close.
async fn step<B, W>(entry: &mut PurchaseEntry<B>, command: Command, out: &mut W) -> io::Result<bool>
where
    B: PosBackend,
    W: Write,
{
    match command {
        Command::Quit => return Ok(false),
        Command::Empty => return Ok(true),
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Code(raw) => {
            entry.update_code(&raw);
        }
        Command::Clear => entry.clear_code(),
        Command::Lookup => {
            if let Err(e) = entry.lookup_product().await {
                notice(out, &e)?;
            }
        }
        Command::Add => match entry.add_to_list() {
            Ok(item) => notice(out, &display::added_message(&item))?,
            Err(e) => notice(out, &e)?,
        },
        Command::Checkout => match entry.checkout().await {
            Ok(receipt) => notice(out, &display::completion_message(&receipt))?,
            Err(e) => notice(out, &e)?,
        },
        Command::List => {}
        Command::Unknown(input) => notice(out, &format!("unknown command '{input}' (type 'help')"))?,
    }

    writeln!(out)?;
    writeln!(out, "{}", entry.view())?;
    Ok(true)
}

fn notice<W: Write>(out: &mut W, message: &dyn std::fmt::Display) -> io::Result<()> {
    writeln!(out, "! {message}")
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use pos_register::ApiError;
    use pos_register_core::{LineItem, Price, Product, ProductCode};

    use super::*;

    #[derive(Default)]
    struct StubBackend {
        fail_purchase: AtomicBool,
        purchases: AtomicUsize,
    }

    impl PosBackend for StubBackend {
        async fn fetch_product(&self, code: &ProductCode) -> Result<Product, ApiError> {
            match code.as_str() {
                "4901234567894" => Ok(Product::new(code.as_str(), "おにぎり", Price::new(100))),
                "4909876543210" => Ok(Product::new(code.as_str(), "お弁当", Price::new(250))),
                _ => Err(ApiError::Status {
                    endpoint: "api/product",
                    status: 404,
                }),
            }
        }

        async fn submit_purchase(&self, _items: &[LineItem]) -> Result<(), ApiError> {
            self.purchases.fetch_add(1, Ordering::SeqCst);
            if self.fail_purchase.load(Ordering::SeqCst) {
                return Err(ApiError::Status {
                    endpoint: "api/purchase",
                    status: 500,
                });
            }
            Ok(())
        }
    }

    async fn run_script(entry: &mut PurchaseEntry<StubBackend>, script: &str) -> String {
        let mut out = Vec::new();
        register_loop(entry, script.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("4901234567894"),
            Command::Code("4901234567894".to_string())
        );
        assert_eq!(Command::parse("code 49-01"), Command::Code("49-01".to_string()));
        assert_eq!(Command::parse("c"), Command::Code(String::new()));
        assert_eq!(Command::parse("  LOOKUP "), Command::Lookup);
        assert_eq!(Command::parse("a"), Command::Add);
        assert_eq!(Command::parse("buy"), Command::Checkout);
        assert_eq!(Command::parse("ls"), Command::List);
        assert_eq!(Command::parse("clear"), Command::Clear);
        assert_eq!(Command::parse("?"), Command::Help);
        assert_eq!(Command::parse("exit"), Command::Quit);
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("dance"), Command::Unknown("dance".to_string()));
    }

    #[tokio::test]
    async fn test_full_sale() {
        let mut entry = PurchaseEntry::new(StubBackend::default());
        let output = run_script(
            &mut entry,
            "4901234567894\nlookup\nadd\n4909876543210\nl\na\ncheckout\nquit\n",
        )
        .await;

        assert!(output.contains("! 「おにぎり」を購入リストに追加しました。"));
        assert!(output.contains("! 「お弁当」を購入リストに追加しました。"));
        // (100 + 250) * 1.1 = 385
        assert!(output.contains("! 購入完了！合計金額(税込): 385円"));
        assert!(entry.purchases().is_empty());
        assert_eq!(entry.backend().purchases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_precondition_notices() {
        let mut entry = PurchaseEntry::new(StubBackend::default());
        let output = run_script(&mut entry, "lookup\nadd\ncheckout\n").await;

        assert!(output.contains("! 商品コードを入力してください。"));
        assert!(output.contains("! 有効な商品を検索してから追加してください。"));
        assert!(output.contains("! 購入リストに商品がありません。"));
        assert_eq!(entry.backend().purchases.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_code_shows_not_found() {
        let mut entry = PurchaseEntry::new(StubBackend::default());
        let output = run_script(&mut entry, "123\nlookup\nadd\n").await;

        assert!(output.contains("商品が見つかりません"));
        assert!(output.contains("! 有効な商品を検索してから追加してください。"));
        assert!(entry.purchases().is_empty());
    }

    #[tokio::test]
    async fn test_failed_checkout_keeps_list() {
        let mut entry = PurchaseEntry::new(StubBackend::default());
        entry.backend().fail_purchase.store(true, Ordering::SeqCst);
        let output = run_script(&mut entry, "4901234567894\nl\na\nbuy\n").await;

        assert!(output.contains("! 購入処理中にエラーが発生しました。"));
        assert_eq!(entry.purchases().len(), 1);
    }

    #[tokio::test]
    async fn test_stops_at_quit() {
        let mut entry = PurchaseEntry::new(StubBackend::default());
        run_script(&mut entry, "quit\n4901234567894\n").await;
        assert!(entry.code().is_empty());
    }

    #[tokio::test]
    async fn test_overlong_code_is_ignored() {
        let mut entry = PurchaseEntry::new(StubBackend::default());
        run_script(&mut entry, "4901234567894\n49012345678945\n").await;
        assert_eq!(entry.code().as_str(), "4901234567894");
    }
}

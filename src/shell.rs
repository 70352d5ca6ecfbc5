//! Interactive command loop over an [`Index`].
//!
//! Each input line is split on whitespace; the first token names the
//! command. Output goes to the supplied writer so sessions can be scripted.

use chrono::{DateTime, Duration, Local, Utc};
use rand::RngCore;
use std::io::{self, BufRead, Write};

use crate::domain::index::Index;
use crate::domain::random_trade::random_trades;
use crate::domain::trade::{Side, TradeRecord};

pub const DEFAULT_PROMPT: &str = "->";

const INDEX_RULE: &str = "=== ==== ======== ==== ======== ========";

const HELP: &str = "
COMMANDS:

    help   - Show this help.
    index  - Show the list of stock and the All-share index.
    trade  - Add random trading.
    buy    - Buy stock. eg. buy 22 ALE 3.12
    sell   - Sell stock. eg. sell 22 ALE 3.12
    list   - Show trading database.
    price  - Recalculate price of stock based on the trailing window
    yield  - Show the dividend yield of all stock
    pe     - Show the P/E Ratio of all stock
    quit   - end the program
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    index: Index,
    window: Duration,
    rng: Box<dyn RngCore>,
}

impl Shell {
    pub fn new(index: Index, window: Duration, rng: Box<dyn RngCore>) -> Self {
        Shell { index, window, rng }
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        prompt: &str,
        banner: bool,
    ) -> io::Result<()> {
        if banner {
            writeln!(out, "\nSuper Simple Stocks\n")?;
            writeln!(out, "Use 'help' for instructions\n")?;
        }

        let mut lines = input.lines();
        loop {
            write!(out, "{}", prompt)?;
            out.flush()?;
            let Some(line) = lines.next() else {
                writeln!(out)?;
                return Ok(());
            };
            if self.execute(&line?, out, Utc::now())? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Executes a single command line as of `now`.
    pub fn execute<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
        now: DateTime<Utc>,
    ) -> io::Result<Flow> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = tokens.first() else {
            return Ok(Flow::Continue);
        };

        match command {
            "quit" => return Ok(Flow::Quit),
            "help" => writeln!(out, "{}", HELP)?,
            "index" => self.show_index(out)?,
            "trade" => self.random_trade(out, now)?,
            "buy" => self.trade(out, command, Side::Buy, &tokens[1..], now)?,
            "sell" => self.trade(out, command, Side::Sell, &tokens[1..], now)?,
            "list" => self.list_trades(out)?,
            "price" => self.recompute_prices(out, now)?,
            "yield" => {
                for inst in self.index.instruments() {
                    writeln!(
                        out,
                        "Dividend Yield of {} is {:.2}",
                        inst.symbol(),
                        inst.dividend_yield()
                    )?;
                }
            }
            "pe" => {
                for inst in self.index.instruments() {
                    writeln!(
                        out,
                        "Price/Earnings Ratio of {} is {:.2}",
                        inst.symbol(),
                        inst.pe_ratio()
                    )?;
                }
            }
            other => writeln!(out, "ERROR: Unknown command {}", other)?,
        }
        Ok(Flow::Continue)
    }

    fn show_index<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nGBCE Index {:.4}\n", self.index.aggregate_index())?;
        writeln!(out, "{INDEX_RULE}")?;
        writeln!(out, "Sym Type Last Div Fix  PAR Val. T. Price")?;
        writeln!(out, "{INDEX_RULE}")?;
        for inst in self.index.instruments() {
            writeln!(
                out,
                "{:>3} {:>4} {:>8.2} {:>4.2} {:>8.2} {:>8.2}",
                inst.symbol(),
                inst.class().label(),
                inst.last_dividend(),
                inst.fixed_dividend_rate(),
                inst.par_value(),
                inst.price()
            )?;
        }
        writeln!(out)
    }

    fn random_trade<W: Write>(&mut self, out: &mut W, now: DateTime<Utc>) -> io::Result<()> {
        match random_trades(&mut self.index, &mut self.rng, now) {
            Ok(_) => writeln!(
                out,
                "Done. {} trading operations in the database",
                self.index.ledger().len()
            ),
            Err(e) => writeln!(out, "ERROR: {}", e),
        }
    }

    fn trade<W: Write>(
        &mut self,
        out: &mut W,
        command: &str,
        side: Side,
        args: &[&str],
        now: DateTime<Utc>,
    ) -> io::Result<()> {
        let [qty, symbol, price, ..] = args else {
            return writeln!(
                out,
                "ERROR: syntax is '{} <quantity> <symbol> <price>'",
                command
            );
        };

        if !self.index.exists(symbol) {
            return writeln!(out, "ERROR: Unknown symbol {}", symbol);
        }

        let (Ok(quantity), Ok(price)) = (qty.parse::<i64>(), price.parse::<f64>()) else {
            return writeln!(
                out,
                "ERROR: syntax is '{} <quantity> <symbol> <price>'",
                command
            );
        };

        match self
            .index
            .submit_trade_at(symbol, side, quantity, price, now)
            .map(|_| ())
        {
            Ok(_) => writeln!(
                out,
                "Done. {} Trading operations in the database",
                self.index.ledger().len()
            ),
            Err(e) => writeln!(
                out,
                "ERROR: Cannot {} {} shares of {} at {}: {}",
                command, quantity, symbol, price, e
            ),
        }
    }

    fn list_trades<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let trades = self.index.list_trades();
        for trade in trades {
            writeln!(out, "{}", format_trade(trade))?;
        }
        writeln!(out, "\n{} trading operations in the database", trades.len())
    }

    fn recompute_prices<W: Write>(&mut self, out: &mut W, now: DateTime<Utc>) -> io::Result<()> {
        for (symbol, price) in self.index.recompute_prices(self.window, now) {
            writeln!(out, "Price of {} is {:.2}", symbol, price)?;
        }
        Ok(())
    }
}

/// `[YYYY-MM-DD HH:MM:SS] BOUGHT 22 shares of ALE at 3.12`, in local time.
pub fn format_trade(trade: &TradeRecord) -> String {
    let stamp = trade.timestamp().with_timezone(&Local);
    format!(
        "[{}] {} {} shares of {} at {:.2}",
        stamp.format("%Y-%m-%d %H:%M:%S"),
        trade.side().verb(),
        trade.quantity(),
        trade.symbol(),
        trade.price()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn shell() -> Shell {
        Shell::new(
            Index::gbce(),
            Duration::minutes(15),
            Box::new(StdRng::seed_from_u64(1)),
        )
    }

    fn exec(shell: &mut Shell, line: &str) -> String {
        let mut out = Vec::new();
        shell.execute(line, &mut out, now()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn blank_line_is_ignored() {
        let mut sh = shell();
        let mut out = Vec::new();
        assert_eq!(sh.execute("   ", &mut out, now()).unwrap(), Flow::Continue);
        assert!(out.is_empty());
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut sh = shell();
        let mut out = Vec::new();
        assert_eq!(sh.execute("quit", &mut out, now()).unwrap(), Flow::Quit);
    }

    #[test]
    fn buy_records_trade() {
        let mut sh = shell();
        let out = exec(&mut sh, "buy 22 ALE 3.12");
        assert_eq!(out, "Done. 1 Trading operations in the database\n");
        let trade = &sh.index().list_trades()[0];
        assert_eq!(trade.side(), Side::Buy);
        assert_eq!(trade.quantity(), 22);
    }

    #[test]
    fn sell_with_extra_whitespace() {
        let mut sh = shell();
        exec(&mut sh, "  sell   5  GIN   1.5 ");
        assert_eq!(sh.index().list_trades()[0].side(), Side::Sell);
    }

    #[test]
    fn buy_unknown_symbol() {
        let mut sh = shell();
        assert_eq!(exec(&mut sh, "buy 1 XYZ 1.0"), "ERROR: Unknown symbol XYZ\n");
        assert!(sh.index().list_trades().is_empty());
    }

    #[test]
    fn buy_missing_arguments() {
        let mut sh = shell();
        assert_eq!(
            exec(&mut sh, "buy 1 ALE"),
            "ERROR: syntax is 'buy <quantity> <symbol> <price>'\n"
        );
    }

    #[test]
    fn buy_non_numeric_quantity() {
        let mut sh = shell();
        assert_eq!(
            exec(&mut sh, "sell lots ALE 1.0"),
            "ERROR: syntax is 'sell <quantity> <symbol> <price>'\n"
        );
    }

    #[test]
    fn buy_negative_price_rejected() {
        let mut sh = shell();
        let out = exec(&mut sh, "buy 3 ALE -1");
        assert!(out.starts_with("ERROR: Cannot buy 3 shares of ALE at -1"));
        assert!(sh.index().list_trades().is_empty());
    }

    #[test]
    fn unknown_command() {
        let mut sh = shell();
        assert_eq!(exec(&mut sh, "sing"), "ERROR: Unknown command sing\n");
    }

    #[test]
    fn random_trade_adds_one_per_instrument() {
        let mut sh = shell();
        assert_eq!(
            exec(&mut sh, "trade"),
            "Done. 5 trading operations in the database\n"
        );
    }

    #[test]
    fn price_then_yield_and_pe() {
        let mut sh = shell();
        exec(&mut sh, "buy 10 POP 2.00");
        let prices = exec(&mut sh, "price");
        assert!(prices.contains("Price of POP is 2.00\n"));
        assert!(prices.contains("Price of JOE is 2.50\n"));

        let yields = exec(&mut sh, "yield");
        assert!(yields.contains("Dividend Yield of POP is 0.04\n"));
        assert!(yields.contains("Dividend Yield of GIN is 0.02\n"));

        let pe = exec(&mut sh, "pe");
        assert!(pe.contains("Price/Earnings Ratio of POP is 25.00\n"));
        assert!(pe.contains("Price/Earnings Ratio of TEA is 0.00\n"));
    }

    #[test]
    fn index_shows_table() {
        let mut sh = shell();
        let out = exec(&mut sh, "index");
        assert!(out.contains("GBCE Index 1.0845\n"));
        assert!(out.contains("=== ==== ======== ==== ======== ========\nSym Type Last Div Fix  PAR Val. T. Price\n"));
        assert!(out.contains("GIN PREF     0.08 2.00     1.00     1.00\n"));
        assert!(out.contains("ALE COMM     0.23 0.00     0.60     0.60\n"));
        assert!(out.contains("JOE COMM"));
    }

    #[test]
    fn list_shows_trades_and_count() {
        let mut sh = shell();
        exec(&mut sh, "buy 22 ALE 3.12");
        exec(&mut sh, "sell 7 TEA 0.90");
        let out = exec(&mut sh, "list");
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].ends_with("] BOUGHT 22 shares of ALE at 3.12"));
        assert!(lines[1].ends_with("] SOLD 7 shares of TEA at 0.90"));
        assert_eq!(lines.last().unwrap(), &"2 trading operations in the database");
    }

    #[test]
    fn run_processes_script_until_quit() {
        let mut sh = shell();
        let script = "buy 1 TEA 1.0\n\nquit\nbuy 1 TEA 1.0\n";
        let mut out = Vec::new();
        sh.run(script.as_bytes(), &mut out, DEFAULT_PROMPT, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\nSuper Simple Stocks\n"));
        assert_eq!(sh.index().list_trades().len(), 1);
    }

    #[test]
    fn run_stops_at_end_of_input() {
        let mut sh = shell();
        let mut out = Vec::new();
        sh.run("help\n".as_bytes(), &mut out, "> ", false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("> \nCOMMANDS:"));
    }
}

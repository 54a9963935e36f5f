//! Interactive command-line menu
//!
//! Drives a [`Bank`] from any line-oriented input. Raw text is converted to
//! account numbers and decimals here; malformed input is reported and the
//! loop carries on, as does every ledger error. Only I/O failures end the
//! session early.

use crate::{Bank, Error, Result};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

const RULE: &str = "==================================================";
const THIN_RULE: &str =
    "--------------------------------------------------------------------------------";

/// What the loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Outcome of asking for an existing account number
enum Lookup {
    Found(String),
    Missing,
    EndOfInput,
}

impl Lookup {
    fn into_flow(self) -> std::result::Result<String, Flow> {
        match self {
            Lookup::Found(number) => Ok(number),
            Lookup::Missing => Err(Flow::Continue),
            Lookup::EndOfInput => Err(Flow::Exit),
        }
    }
}

/// One interactive session against a bank
#[derive(Debug)]
pub struct Session<'a, R, W> {
    bank: &'a mut Bank,
    input: R,
    output: W,
    currency: String,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Create a session printing amounts with `$`
    pub fn new(bank: &'a mut Bank, input: R, output: W) -> Self {
        Self {
            bank,
            input,
            output,
            currency: "$".to_string(),
        }
    }

    /// Use a different currency symbol in output
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency = symbol.into();
        self
    }

    /// Run until the user picks "Exit" or input ends
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to {}!", self.bank.name())?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter your choice (1-8): ")? else {
                self.goodbye()?;
                return Ok(());
            };

            match self.dispatch(&choice) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => {
                    self.goodbye()?;
                    return Ok(());
                }
                Err(Error::Io(err)) => return Err(Error::Io(err)),
                Err(err) => writeln!(self.output, "\n✗ Error: {}", err)?,
            }
        }
    }

    fn dispatch(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => self.create_account(),
            "2" => self.deposit(),
            "3" => self.withdraw(),
            "4" => self.check_balance(),
            "5" => self.transfer(),
            "6" => self.history(),
            "7" => self.list_accounts(),
            "8" => Ok(Flow::Exit),
            _ => {
                writeln!(
                    self.output,
                    "\n✗ Invalid choice. Please enter a number between 1 and 8."
                )?;
                Ok(Flow::Continue)
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n{}", RULE)?;
        writeln!(self.output, "BANKING SYSTEM")?;
        writeln!(self.output, "{}", RULE)?;
        for (i, item) in [
            "Create Account",
            "Deposit",
            "Withdraw",
            "Check Balance",
            "Transfer",
            "View Transaction History",
            "List All Accounts",
            "Exit",
        ]
        .iter()
        .enumerate()
        {
            writeln!(self.output, "{}. {}", i + 1, item)?;
        }
        writeln!(self.output, "{}", RULE)?;
        Ok(())
    }

    fn create_account(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("Enter customer name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(raw) = self.prompt("Enter initial balance (or 0): ")? else {
            return Ok(Flow::Exit);
        };
        let raw = if raw.is_empty() { "0".to_string() } else { raw };
        let Some(initial) = self.parse_amount(&raw)? else {
            return Ok(Flow::Continue);
        };

        let account = self.bank.create_account(name, initial)?;
        let (number, customer, balance) = (
            account.account_number().to_string(),
            account.customer_name().to_string(),
            account.balance(),
        );

        writeln!(self.output, "\n✓ Account created successfully!")?;
        writeln!(self.output, "Account Number: {}", number)?;
        writeln!(self.output, "Customer: {}", customer)?;
        writeln!(self.output, "Balance: {}", money(&self.currency, balance))?;
        Ok(Flow::Continue)
    }

    fn deposit(&mut self) -> Result<Flow> {
        let number = match self.existing_account()?.into_flow() {
            Ok(number) => number,
            Err(flow) => return Ok(flow),
        };
        let Some(raw) = self.prompt("Enter deposit amount: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.parse_amount(&raw)? else {
            return Ok(Flow::Continue);
        };

        let balance = self.bank.deposit(&number, amount)?;
        writeln!(self.output, "\n✓ Deposited {}", money(&self.currency, amount))?;
        writeln!(self.output, "New balance: {}", money(&self.currency, balance))?;
        Ok(Flow::Continue)
    }

    fn withdraw(&mut self) -> Result<Flow> {
        let number = match self.existing_account()?.into_flow() {
            Ok(number) => number,
            Err(flow) => return Ok(flow),
        };
        let Some(raw) = self.prompt("Enter withdrawal amount: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.parse_amount(&raw)? else {
            return Ok(Flow::Continue);
        };

        let balance = self.bank.withdraw(&number, amount)?;
        writeln!(self.output, "\n✓ Withdrew {}", money(&self.currency, amount))?;
        writeln!(self.output, "New balance: {}", money(&self.currency, balance))?;
        Ok(Flow::Continue)
    }

    fn check_balance(&mut self) -> Result<Flow> {
        let number = match self.existing_account()?.into_flow() {
            Ok(number) => number,
            Err(flow) => return Ok(flow),
        };
        let Some(account) = self.bank.get_account(&number) else {
            return Ok(Flow::Continue);
        };
        let (customer, balance) = (account.customer_name().to_string(), account.balance());

        writeln!(self.output, "\nAccount: {}", number)?;
        writeln!(self.output, "Customer: {}", customer)?;
        writeln!(self.output, "Balance: {}", money(&self.currency, balance))?;
        Ok(Flow::Continue)
    }

    fn transfer(&mut self) -> Result<Flow> {
        let Some(from) = self.prompt("Enter source account number: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(to) = self.prompt("Enter destination account number: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(raw) = self.prompt("Enter transfer amount: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.parse_amount(&raw)? else {
            return Ok(Flow::Continue);
        };

        self.bank.transfer(&from, &to, amount)?;
        writeln!(
            self.output,
            "\n✓ Transferred {} from {} to {}",
            money(&self.currency, amount),
            from,
            to
        )?;
        Ok(Flow::Continue)
    }

    fn history(&mut self) -> Result<Flow> {
        let number = match self.existing_account()?.into_flow() {
            Ok(number) => number,
            Err(flow) => return Ok(flow),
        };
        let transactions = match self.bank.get_account(&number) {
            Some(account) => account.transaction_history(),
            None => return Ok(Flow::Continue),
        };

        writeln!(self.output, "\nTransaction History for Account {}:", number)?;
        writeln!(self.output, "{}", THIN_RULE)?;
        for (i, tx) in transactions.iter().enumerate() {
            writeln!(
                self.output,
                "{}. {} | {}: {} | {} | Balance: {}",
                i + 1,
                tx.timestamp.format("%Y-%m-%d %H:%M:%S"),
                tx.kind.as_str().to_uppercase(),
                money(&self.currency, tx.amount),
                tx.description,
                money(&self.currency, tx.balance_after)
            )?;
        }
        Ok(Flow::Continue)
    }

    fn list_accounts(&mut self) -> Result<Flow> {
        if self.bank.is_empty() {
            writeln!(self.output, "\nNo accounts found!")?;
            return Ok(Flow::Continue);
        }

        let lines: Vec<String> = self
            .bank
            .list_accounts()
            .into_iter()
            .map(|account| {
                format!(
                    "Account {}: {} - Balance: {}",
                    account.account_number(),
                    account.customer_name(),
                    money(&self.currency, account.balance())
                )
            })
            .collect();

        writeln!(self.output, "\nAll Accounts in {}:", self.bank.name())?;
        writeln!(self.output, "{}", THIN_RULE)?;
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(
            self.output,
            "\nTotal Deposits: {}",
            money(&self.currency, self.bank.total_deposits())
        )?;
        Ok(Flow::Continue)
    }

    // Unknown numbers are reported here.
    fn existing_account(&mut self) -> Result<Lookup> {
        let Some(number) = self.prompt("Enter account number: ")? else {
            return Ok(Lookup::EndOfInput);
        };
        if self.bank.get_account(&number).is_none() {
            writeln!(self.output, "\n✗ Account {} not found!", number)?;
            return Ok(Lookup::Missing);
        }
        Ok(Lookup::Found(number))
    }

    fn parse_amount(&mut self, raw: &str) -> Result<Option<Decimal>> {
        match Decimal::from_str(raw) {
            Ok(amount) => Ok(Some(amount)),
            Err(_) => {
                writeln!(self.output, "\n✗ Error: Invalid amount '{}'", raw)?;
                Ok(None)
            }
        }
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn goodbye(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "\nThank you for using our banking system. Goodbye!"
        )?;
        Ok(())
    }
}

fn money(symbol: &str, amount: Decimal) -> String {
    format!("{}{:.2}", symbol, amount)
}

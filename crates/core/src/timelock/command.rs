use alloy::primitives::{Address, Bytes};
use eyre::{Result, eyre};

/// The CLI invocation that replays a queued transaction once its eta has
/// passed. Rendered from the exact calldata submitted in the queue call,
/// so rendering and parsing are lossless both ways.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteCommand {
    pub target: Address,
    pub value: String,
    pub signature: String,
    pub data: Bytes,
    pub eta: u64,
}

impl ExecuteCommand {
    pub fn render(&self) -> String {
        format!(
            "foreman-cli execute --target {} --value {} --signature '{}' --data {} --eta {}",
            self.target, self.value, self.signature, self.data, self.eta
        )
    }

    pub fn parse(command: &str) -> Result<Self> {
        let tokens = tokenize(command);

        let mut target = None;
        let mut value = None;
        let mut signature = None;
        let mut data = None;
        let mut eta = None;

        let mut i = 0;
        while i < tokens.len() {
            let Some(flag) = tokens[i].strip_prefix("--") else {
                // Binary and subcommand names.
                i += 1;
                continue;
            };
            let arg = tokens
                .get(i + 1)
                .ok_or_else(|| eyre!("missing value for --{} in execute command", flag))?;
            match flag {
                "target" => {
                    target = Some(
                        arg.parse::<Address>()
                            .map_err(|_| eyre!("invalid target address: {}", arg))?,
                    )
                }
                "value" => value = Some(arg.clone()),
                "signature" => signature = Some(arg.clone()),
                "data" => {
                    data = Some(
                        arg.parse::<Bytes>()
                            .map_err(|_| eyre!("invalid calldata hex: {}", arg))?,
                    )
                }
                "eta" => {
                    eta = Some(arg.parse::<u64>().map_err(|_| eyre!("invalid eta: {}", arg))?)
                }
                other => return Err(eyre!("unknown flag --{} in execute command", other)),
            }
            i += 2;
        }

        Ok(Self {
            target: target.ok_or_else(|| eyre!("execute command missing --target"))?,
            value: value.ok_or_else(|| eyre!("execute command missing --value"))?,
            signature: signature.ok_or_else(|| eyre!("execute command missing --signature"))?,
            data: data.ok_or_else(|| eyre!("execute command missing --data"))?,
            eta: eta.ok_or_else(|| eyre!("execute command missing --eta"))?,
        })
    }
}

// Whitespace splitting with single-quote grouping; signatures contain
// commas and parentheses.
fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '\'' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

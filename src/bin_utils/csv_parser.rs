use std::io::Read;

use crate::{
    account::AccountNumber,
    command::{CommandFields, CommandKind},
};
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Command {
    #[serde(rename = "type")]
    pub kind: CommandKind,
    pub client: Option<String>,
    pub account: Option<AccountNumber>,
    pub amount: Option<Decimal>,
    pub name: Option<String>,
    pub birth_date: Option<String>,
    pub address: Option<String>,
}

impl Command {
    pub fn into_parts(self) -> (CommandKind, CommandFields) {
        (
            self.kind,
            CommandFields {
                client: self.client,
                account: self.account,
                amount: self.amount,
                name: self.name,
                birth_date: self.birth_date,
                address: self.address,
            },
        )
    }
}

/// Parses a command script in CSV format.
///
/// Yields every row together with the line it starts on.
pub struct CsvCommandParser<R> {
    iter: DeserializeRecordsIntoIter<R, Command>,
}

impl<R> CsvCommandParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvCommandParser<R>
where
    R: Read,
{
    type Item = (u64, Result<Command, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_rows() {
        let input = "\
type,client,account,amount,name,birth_date,address
register, 111.444.777-35 ,,,Ana Souza,17/05/1990,\"Rua A, 10 - Centro - Campinas/SP\"
open,11144477735
deposit,,1,100.50
withdraw,,1,x
bogus,,,
";
        let mut rows: Vec<_> = CsvCommandParser::new(input.as_bytes()).collect();
        assert_eq!(rows.len(), 5);

        let (line, register) = &rows[0];
        assert_eq!(*line, 2);
        let register = register.as_ref().unwrap();
        assert_eq!(register.kind, CommandKind::Register);
        assert_eq!(register.client.as_deref(), Some("111.444.777-35"));
        assert_eq!(register.account, None);
        assert_eq!(
            register.address.as_deref(),
            Some("Rua A, 10 - Centro - Campinas/SP")
        );

        let (_, open) = &rows[1];
        let open = open.as_ref().unwrap();
        assert_eq!(open.kind, CommandKind::Open);
        assert_eq!(open.amount, None);

        let (line, deposit) = rows.remove(2);
        assert_eq!(line, 4);
        let (kind, fields) = deposit.unwrap().into_parts();
        assert_eq!(kind, CommandKind::Deposit);
        assert_eq!(fields.account, Some(1));
        assert_eq!(fields.amount, Some(dec!(100.50)));
        assert_eq!(fields.client, None);

        // unparsable amount and unknown command type
        assert!(rows[2].1.is_err());
        assert!(rows[3].1.is_err());
    }
}

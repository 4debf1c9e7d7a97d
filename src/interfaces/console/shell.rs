//! Interactive menu driving the parking service

use std::io::{self, Write};
use std::sync::Arc;

use tracing::{info, warn};

use crate::application::{EntryReceipt, ExitReceipt, InputSource, ParkingService};
use crate::domain::DomainError;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const WELCOME: &str = "Welcome to Parking System!";
const MENU: &str = "Please select an option. Simply enter the number to choose an action\n\
                    1 New Vehicle Entering - Allocate Parking Space\n\
                    2 Vehicle Exiting - Generate Ticket Price\n\
                    3 Shutdown System";
const UNSUPPORTED: &str =
    "Unsupported option. Please enter a number corresponding to the provided menu";

/// Menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Enter,
    Exit,
    Shutdown,
}

impl MenuOption {
    pub fn from_selection(selection: u32) -> Option<Self> {
        match selection {
            1 => Some(Self::Enter),
            2 => Some(Self::Exit),
            3 => Some(Self::Shutdown),
            _ => None,
        }
    }
}

/// Operator console: one transaction per menu choice until shutdown.
pub struct InteractiveShell<W: Write> {
    service: ParkingService,
    input: Arc<dyn InputSource>,
    out: W,
    currency: String,
}

impl<W: Write> InteractiveShell<W> {
    /// `input` must be the same source the service reads from.
    pub fn new(
        service: ParkingService,
        input: Arc<dyn InputSource>,
        out: W,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            service,
            input,
            out,
            currency: currency.into(),
        }
    }

    /// Run until the operator shuts down or the input ends.
    ///
    /// Only failures to write to the console end the loop early; transaction
    /// errors are reported and the menu is shown again.
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "{WELCOME}")?;

        loop {
            writeln!(self.out, "{MENU}")?;
            self.out.flush()?;

            let option = match self.input.read_selection() {
                Ok(None) => {
                    info!("Input closed, shutting down");
                    break;
                }
                Ok(Some(selection)) => MenuOption::from_selection(selection),
                Err(_) => None,
            };

            match option {
                Some(MenuOption::Enter) => self.enter().await?,
                Some(MenuOption::Exit) => self.exit().await?,
                Some(MenuOption::Shutdown) => {
                    info!("Shutdown requested by operator");
                    break;
                }
                None => writeln!(self.out, "{UNSUPPORTED}")?,
            }
        }

        writeln!(self.out, "Exiting from the parking system")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    async fn enter(&mut self) -> io::Result<()> {
        match self.service.process_incoming_vehicle().await {
            Ok(receipt) => self.print_entry(&receipt),
            Err(e) => {
                warn!(error = %e, "Entry aborted");
                writeln!(self.out, "Unable to process incoming vehicle: {e}")
            }
        }
    }

    async fn exit(&mut self) -> io::Result<()> {
        match self.service.process_exiting_vehicle().await {
            Ok(receipt) => self.print_exit(&receipt),
            Err(e) => {
                warn!(error = %e, "Exit aborted");
                match e.as_domain() {
                    Some(DomainError::TicketNotFound(_)) | Some(DomainError::InvalidRegistration(_)) => {
                        writeln!(self.out, "Unable to process exiting vehicle: {e}")
                    }
                    _ => writeln!(
                        self.out,
                        "Unable to process exiting vehicle: {e}. The ticket is still open, please retry"
                    ),
                }
            }
        }
    }

    fn print_entry(&mut self, receipt: &EntryReceipt) -> io::Result<()> {
        let ticket = &receipt.ticket;
        writeln!(
            self.out,
            "Please park your vehicle in spot number: {}",
            ticket.spot.id
        )?;
        writeln!(
            self.out,
            "Recorded in-time for vehicle number: {} is: {}",
            ticket.registration,
            ticket.entry_time.format(TIME_FORMAT)
        )?;
        if receipt.returning_customer {
            let policy = self.service.fare_policy();
            writeln!(
                self.out,
                "You have already come at least once, if you stay more than {}min you will benefit from a {}% discount when you go out",
                policy.grace_period_minutes(),
                policy.loyalty_discount_percent().normalize()
            )?;
        }
        Ok(())
    }

    fn print_exit(&mut self, receipt: &ExitReceipt) -> io::Result<()> {
        let ticket = &receipt.ticket;
        if receipt.discount_applied {
            writeln!(
                self.out,
                "Loyalty discount applied, base fare was: {:.2} {}",
                receipt.base_price, self.currency
            )?;
        }
        writeln!(
            self.out,
            "Please pay the parking fare: {:.2} {}",
            ticket.price, self.currency
        )?;
        if let Some(exit_time) = ticket.exit_time {
            writeln!(
                self.out,
                "Recorded out-time for vehicle number: {} is: {}",
                ticket.registration,
                exit_time.format(TIME_FORMAT)
            )?;
        }
        if !receipt.spot_released {
            writeln!(
                self.out,
                "Fare recorded, but spot number {} could not be freed, please notify an attendant",
                ticket.spot.id
            )?;
        }
        Ok(())
    }
}

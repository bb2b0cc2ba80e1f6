//! WhatsApp scheduling bot.
//!
//! A per-phone state machine that walks a client from a greeting to a
//! persisted booking: choose a barber, a service, a day and a time, then
//! confirm. State lives in Redis through [`SessionService`]; every schedule
//! computation is delegated to [`AvailabilityService`], and the final write
//! goes through the guarded booking insert, so a slot that was taken while
//! the client was deciding comes back as a polite retry, not a double
//! booking.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{booking::CreateBooking, webhook::IncomingMessage},
    repository::Repository,
};

use super::{
    availability::AvailabilityService, bookings::BookingsService, session::SessionService,
    whatsapp::WhatsAppService,
};

/// Where a client currently is in the scheduling conversation.
///
/// Each variant stores the numbered options that were offered, so a reply
/// like "2" can be resolved without re-querying.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ChatState {
    ChoosingEmployee {
        options: Vec<(i32, String)>,
    },
    ChoosingService {
        employee_id: i32,
        options: Vec<(i32, String)>,
    },
    ChoosingDay {
        employee_id: i32,
        service_id: i32,
        days: Vec<NaiveDate>,
    },
    ChoosingSlot {
        employee_id: i32,
        service_id: i32,
        slots: Vec<NaiveDateTime>,
    },
    Confirming {
        employee_id: i32,
        service_id: i32,
        start: NaiveDateTime,
    },
}

/// Resolve a 1-based menu reply against the offered options
fn parse_choice<T: Clone>(text: &str, options: &[T]) -> Option<T> {
    let index: usize = text.trim().parse().ok()?;
    if index == 0 {
        return None;
    }
    options.get(index - 1).cloned()
}

#[derive(Clone)]
pub struct BotService {
    repository: Repository,
    availability: AvailabilityService,
    bookings: BookingsService,
    session: SessionService,
    whatsapp: WhatsAppService,
}

impl BotService {
    pub fn new(
        repository: Repository,
        availability: AvailabilityService,
        bookings: BookingsService,
        session: SessionService,
        whatsapp: WhatsAppService,
    ) -> Self {
        Self {
            repository,
            availability,
            bookings,
            session,
            whatsapp,
        }
    }

    /// Advance the conversation for one inbound message and send the reply
    pub async fn handle_message(&self, message: &IncomingMessage) -> AppResult<()> {
        let state: Option<ChatState> = self.session.get(&message.sender).await?;

        let reply = match state {
            None => self.start_conversation(&message.sender).await?,
            Some(state) => match self.advance(&message.sender, state, message).await {
                Ok(reply) => reply,
                Err(AppError::Conflict(_)) => {
                    self.session.clear(&message.sender).await?;
                    "That time was just taken. Let's start over - send any message."
                        .to_string()
                }
                Err(e) => return Err(e),
            },
        };

        self.whatsapp.send_text(&message.sender, &reply).await
    }

    /// Open a new session: greet and list the barbers
    async fn start_conversation(&self, phone: &str) -> AppResult<String> {
        let employees = self.repository.employees.list().await?;
        if employees.is_empty() {
            return Ok("Sorry, no barbers are available right now.".to_string());
        }

        let options: Vec<(i32, String)> = employees
            .into_iter()
            .map(|e| (e.id, e.name))
            .collect();

        let mut text = String::from("Welcome! Who would you like to book with?\n");
        for (i, (_, name)) in options.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", i + 1, name));
        }

        self.session
            .set(phone, &ChatState::ChoosingEmployee { options })
            .await?;
        Ok(text)
    }

    async fn advance(
        &self,
        phone: &str,
        state: ChatState,
        message: &IncomingMessage,
    ) -> AppResult<String> {
        match state {
            ChatState::ChoosingEmployee { options } => {
                let Some((employee_id, _)) = parse_choice(&message.text, &options) else {
                    return self.reset(phone).await;
                };
                self.offer_services(phone, employee_id).await
            }
            ChatState::ChoosingService {
                employee_id,
                options,
            } => {
                let Some((service_id, _)) = parse_choice(&message.text, &options) else {
                    return self.reset(phone).await;
                };
                self.offer_days(phone, employee_id, service_id).await
            }
            ChatState::ChoosingDay {
                employee_id,
                service_id,
                days,
            } => {
                let Some(date) = parse_choice(&message.text, &days) else {
                    return self.reset(phone).await;
                };
                self.offer_slots(phone, employee_id, service_id, date).await
            }
            ChatState::ChoosingSlot {
                employee_id,
                service_id,
                slots,
            } => {
                let Some(start) = parse_choice(&message.text, &slots) else {
                    return self.reset(phone).await;
                };
                self.offer_confirmation(phone, employee_id, service_id, start)
                    .await
            }
            ChatState::Confirming {
                employee_id,
                service_id,
                start,
            } => {
                if message.text.trim() == "1" {
                    self.finalize_booking(phone, employee_id, service_id, start, message)
                        .await
                } else {
                    self.reset(phone).await
                }
            }
        }
    }

    async fn offer_services(&self, phone: &str, employee_id: i32) -> AppResult<String> {
        let services = self.repository.catalog.list().await?;
        if services.is_empty() {
            self.session.clear(phone).await?;
            return Ok("Sorry, no services are configured yet.".to_string());
        }

        let options: Vec<(i32, String)> = services
            .iter()
            .map(|s| {
                (
                    s.id,
                    format!("{} ({} min, R$ {})", s.description, s.duration_minutes, s.price),
                )
            })
            .collect();

        let mut text = String::from("Which service?\n");
        for (i, (_, label)) in options.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", i + 1, label));
        }

        self.session
            .set(
                phone,
                &ChatState::ChoosingService {
                    employee_id,
                    options,
                },
            )
            .await?;
        Ok(text)
    }

    async fn offer_days(
        &self,
        phone: &str,
        employee_id: i32,
        service_id: i32,
    ) -> AppResult<String> {
        let today = chrono::Local::now().date_naive();
        let days = self.availability.available_days(today);

        let mut text = String::from("Which day?\n");
        for (i, day) in days.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", i + 1, day.format("%d/%m")));
        }

        self.session
            .set(
                phone,
                &ChatState::ChoosingDay {
                    employee_id,
                    service_id,
                    days,
                },
            )
            .await?;
        Ok(text)
    }

    async fn offer_slots(
        &self,
        phone: &str,
        employee_id: i32,
        service_id: i32,
        date: NaiveDate,
    ) -> AppResult<String> {
        let query = crate::models::slot::SlotQuery {
            employee_id,
            date: date.format("%Y-%m-%d").to_string(),
            service_id: Some(service_id),
            work_start: None,
            work_end: None,
            slot_minutes: None,
        };
        let slots = self.availability.list_available_slots(&query).await?;

        if slots.is_empty() {
            // day off or fully booked: offer the days again
            let followup = self.offer_days(phone, employee_id, service_id).await?;
            return Ok(format!(
                "No free times on {}.\n{}",
                date.format("%d/%m"),
                followup
            ));
        }

        let starts: Vec<NaiveDateTime> = slots.iter().map(|s| s.start).collect();
        let mut text = format!("Free times on {}:\n", date.format("%d/%m"));
        for (i, start) in starts.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", i + 1, start.format("%H:%M")));
        }

        self.session
            .set(
                phone,
                &ChatState::ChoosingSlot {
                    employee_id,
                    service_id,
                    slots: starts,
                },
            )
            .await?;
        Ok(text)
    }

    async fn offer_confirmation(
        &self,
        phone: &str,
        employee_id: i32,
        service_id: i32,
        start: NaiveDateTime,
    ) -> AppResult<String> {
        let employee = self.repository.employees.get_by_id(employee_id).await?;
        let service = self.repository.catalog.get_by_id(service_id).await?;

        self.session
            .set(
                phone,
                &ChatState::Confirming {
                    employee_id,
                    service_id,
                    start,
                },
            )
            .await?;

        Ok(format!(
            "Booking summary:\n{} with {} on {} at {}.\n1. Confirm\n2. Start over",
            service.description,
            employee.name,
            start.format("%d/%m"),
            start.format("%H:%M"),
        ))
    }

    async fn finalize_booking(
        &self,
        phone: &str,
        employee_id: i32,
        service_id: i32,
        start: NaiveDateTime,
        message: &IncomingMessage,
    ) -> AppResult<String> {
        let name = if message.push_name.is_empty() {
            phone
        } else {
            &message.push_name
        };
        let customer = self.repository.customers.get_or_create(phone, name).await?;

        let booking = self
            .bookings
            .create(&CreateBooking {
                employee_id,
                service_id,
                customer_id: customer.id,
                start_time: start,
            })
            .await?;

        self.session.clear(phone).await?;

        // Heads-up to the barber; the booking stands even if the notify fails
        let employee = self.repository.employees.get_by_id(employee_id).await?;
        let service = self.repository.catalog.get_by_id(service_id).await?;
        let notice = format!(
            "New booking: {} for {} on {} at {}.",
            service.description,
            customer.name,
            start.format("%d/%m"),
            start.format("%H:%M"),
        );
        if let Err(e) = self.whatsapp.send_text(&employee.phone, &notice).await {
            tracing::warn!(booking_id = booking.id, "Failed to notify employee: {}", e);
        }

        Ok(format!(
            "Done! You're booked on {} at {}. See you soon, {}!",
            start.format("%d/%m"),
            start.format("%H:%M"),
            customer.name,
        ))
    }

    async fn reset(&self, phone: &str) -> AppResult<String> {
        self.session.clear(phone).await?;
        Ok("Sorry, I didn't get that. Send any message to start again.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_one_based() {
        let options = vec![(10, "a".to_string()), (20, "b".to_string())];
        assert_eq!(parse_choice("1", &options), Some((10, "a".to_string())));
        assert_eq!(parse_choice(" 2 ", &options), Some((20, "b".to_string())));
    }

    #[test]
    fn test_parse_choice_rejects_out_of_range() {
        let options = vec![1, 2, 3];
        assert_eq!(parse_choice("0", &options), None);
        assert_eq!(parse_choice("4", &options), None);
        assert_eq!(parse_choice("abc", &options), None);
        assert_eq!(parse_choice("-1", &options), None);
    }

    #[test]
    fn test_chat_state_round_trips_through_json() {
        let state = ChatState::ChoosingDay {
            employee_id: 3,
            service_id: 7,
            days: vec![NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()],
        };
        let raw = serde_json::to_string(&state).unwrap();
        let back: ChatState = serde_json::from_str(&raw).unwrap();
        match back {
            ChatState::ChoosingDay {
                employee_id,
                service_id,
                days,
            } => {
                assert_eq!(employee_id, 3);
                assert_eq!(service_id, 7);
                assert_eq!(days.len(), 1);
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }
}

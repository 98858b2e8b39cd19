use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::bookings::ConfirmationRow;

const CINEMA_NAME: &str = "HiMovie Cinema";

#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub first_name: String,
    pub title: String,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
    pub seats: Vec<String>,
    pub total_amount: Decimal,
    pub booking_reference: String,
}

impl From<ConfirmationRow> for BookingConfirmation {
    fn from(row: ConfirmationRow) -> Self {
        Self {
            first_name: row.first_name,
            title: row.title,
            show_date: row.show_date,
            show_time: row.show_time,
            seats: row.seats,
            total_amount: row.total_amount,
            booking_reference: row.booking_reference,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

pub fn render_confirmation(from: &str, to: &str, details: &BookingConfirmation) -> EmailMessage {
    let date = details.show_date.format("%A, %B %-d, %Y").to_string();
    let time = details.show_time.format("%H:%M").to_string();
    let seats = details.seats.join(", ");
    let total = details.total_amount.round_dp(2);

    let subject = format!(
        "Booking Confirmed: {} - {}",
        details.title, details.booking_reference
    );

    let text = format!(
        "Hi {name},\n\n\
         Thank you for choosing {cinema}! Your booking has been confirmed.\n\n\
         {title}\n\
         Date: {date}\n\
         Time: {time}\n\
         Seats: {seats}\n\
         Total Amount: ${total:.2}\n\
         Reference: {reference}\n\n\
         Please show this confirmation at the cinema entrance.\n",
        name = details.first_name,
        cinema = CINEMA_NAME,
        title = details.title,
        reference = details.booking_reference,
    );

    let html = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h2>Booking Confirmation</h2>\
         <p>Hi {name},</p>\
         <p>Thank you for choosing <strong>{cinema}</strong>! Your booking has been confirmed.</p>\
         <h3>{title}</h3>\
         <p><strong>Date:</strong> {date}</p>\
         <p><strong>Time:</strong> {time}</p>\
         <p><strong>Seats:</strong> {seats}</p>\
         <p><strong>Total Amount:</strong> ${total:.2}</p>\
         <p><strong>Reference:</strong> {reference}</p>\
         <p>Please show this confirmation at the cinema entrance.</p>\
         </div>",
        name = escape_html(&details.first_name),
        cinema = CINEMA_NAME,
        title = escape_html(&details.title),
        seats = escape_html(&seats),
        reference = escape_html(&details.booking_reference),
    );

    EmailMessage {
        from: from.to_string(),
        to: to.to_string(),
        subject,
        text,
        html,
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

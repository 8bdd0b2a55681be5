//! Fixed-layout PDF receipts. One A4 page each, absolute text positions,
//! the base-14 Helvetica faces so the documents carry no embedded fonts.
//! Missing optional fields render as empty strings.

use axum::http::header;
use axum::response::IntoResponse;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use roam_core::deal::DealBookingDetails;
use roam_core::money::group_inr;
use roam_core::package::PackageBookingDetails;
use roam_core::ticket::Ticket;

const PAGE_WIDTH_PT: f32 = 595.0;
const PAGE_HEIGHT_PT: f32 = 842.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MM_TO_PT: f32 = 72.0 / 25.4;
const MARGIN_MM: f32 = 20.0;
const VALUE_X_MM: f32 = 70.0;

const REGULAR: Name = Name(b"F1");
const BOLD: Name = Name(b"F2");

/// Wrap PDF bytes in the attachment response the download links expect.
pub fn attachment(filename: String, bytes: Vec<u8>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        bytes,
    )
}

/// One receipt page under construction. Positions are given in millimetres
/// from the top-left corner, the way the layouts were sketched.
struct Receipt {
    content: Content,
}

impl Receipt {
    fn new() -> Self {
        Self {
            content: Content::new(),
        }
    }

    fn run(&mut self, font: Name, x_mm: f32, from_top_mm: f32, size: f32, value: &str) {
        self.content.begin_text();
        self.content.set_font(font, size);
        self.content
            .next_line(x_mm * MM_TO_PT, (PAGE_HEIGHT_MM - from_top_mm) * MM_TO_PT);
        self.content.show(Str(value.as_bytes()));
        self.content.end_text();
    }

    fn text(&mut self, x_mm: f32, from_top_mm: f32, size: f32, value: &str) {
        self.run(REGULAR, x_mm, from_top_mm, size, value);
    }

    fn strong(&mut self, x_mm: f32, from_top_mm: f32, size: f32, value: &str) {
        self.run(BOLD, x_mm, from_top_mm, size, value);
    }

    fn brand(&mut self, name: &str, tagline: &str) {
        self.strong(MARGIN_MM, 25.0, 24.0, name);
        self.text(MARGIN_MM, 33.0, 11.0, tagline);
    }

    fn heading(&mut self, from_top_mm: f32, title: &str) {
        self.strong(MARGIN_MM, from_top_mm, 14.0, title);
    }

    fn field(&mut self, from_top_mm: f32, label: &str, value: &str) {
        self.text(MARGIN_MM, from_top_mm, 11.0, label);
        self.strong(VALUE_X_MM, from_top_mm, 11.0, value);
    }

    fn finish(self) -> Vec<u8> {
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let regular_id = Ref::new(4);
        let bold_id = Ref::new(5);
        let content_id = Ref::new(6);

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);
        {
            let mut page = pdf.page(page_id);
            page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH_PT, PAGE_HEIGHT_PT));
            page.parent(page_tree_id);
            page.contents(content_id);
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(REGULAR, regular_id);
            fonts.pair(BOLD, bold_id);
        }
        pdf.type1_font(regular_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));
        pdf.stream(content_id, &self.content.finish());
        pdf.finish()
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn rupees(amount: f64) -> String {
    format!("Rs. {}", group_inr(amount))
}

pub fn ticket_receipt(ticket: &Ticket) -> Vec<u8> {
    let mut receipt = Receipt::new();
    receipt.brand("Roam Air", "Your Journey Begins Here");

    receipt.field(50.0, "PNR Number:", &ticket.pnr_no);

    receipt.heading(65.0, "Passenger Details");
    receipt.field(73.0, "Name:", opt(&ticket.passenger_name));
    receipt.field(80.0, "Class:", opt(&ticket.class_type));
    receipt.field(87.0, "Seat Number:", opt(&ticket.seat_no));

    receipt.heading(102.0, "Flight Details");
    receipt.field(110.0, "Flight Number:", opt(&ticket.flight_no));
    let date = ticket
        .date
        .map(|d| d.format("%A, %d %B %Y").to_string())
        .unwrap_or_default();
    receipt.field(117.0, "Date:", &date);

    // journey block
    receipt.text(MARGIN_MM, 132.0, 9.0, "FROM");
    receipt.strong(MARGIN_MM, 139.0, 16.0, opt(&ticket.source));
    receipt.text(MARGIN_MM, 146.0, 11.0, opt(&ticket.departure_time));
    receipt.strong(100.0, 139.0, 16.0, "->");
    receipt.text(120.0, 132.0, 9.0, "TO");
    receipt.strong(120.0, 139.0, 16.0, opt(&ticket.destination));
    receipt.text(120.0, 146.0, 11.0, opt(&ticket.arrival_time));

    receipt.heading(162.0, "Payment Details");
    receipt.field(170.0, "Fare:", &rupees(ticket.fare.unwrap_or(0.0)));
    receipt.field(177.0, "Payment Mode:", opt(&ticket.payment_mode));
    receipt.field(184.0, "Transaction ID:", opt(&ticket.transaction_id));
    receipt.field(191.0, "Total Amount:", &rupees(ticket.amount.unwrap_or(0.0)));

    let booked = ticket
        .booking_time
        .map(|t| t.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_default();
    receipt.text(MARGIN_MM, 210.0, 10.0, &format!("Booking Time: {booked}"));

    receipt.strong(MARGIN_MM, 225.0, 9.0, "Important:");
    receipt.text(
        MARGIN_MM,
        231.0,
        9.0,
        "Please carry a valid photo ID proof. Check-in closes 45 minutes before departure.",
    );
    receipt.text(
        MARGIN_MM,
        237.0,
        9.0,
        "This is an electronic ticket. Please carry a printout or show on mobile.",
    );

    receipt.finish()
}

pub fn package_receipt(booking: &PackageBookingDetails) -> Vec<u8> {
    let mut receipt = Receipt::new();
    receipt.brand("Roam Travel", "Holiday Package Confirmation");

    receipt.heading(50.0, "Booking Summary");
    receipt.field(58.0, "Booking ID:", &booking.booking_id.to_string());
    receipt.field(65.0, "Travel Date:", &booking.travel_date.to_string());
    receipt.field(72.0, "Payment Mode:", &booking.payment_mode);
    receipt.field(79.0, "Transaction ID:", opt(&booking.transaction_id));

    receipt.heading(94.0, "Passenger");
    receipt.field(102.0, "Name:", &booking.customer_name);
    receipt.field(109.0, "Email:", &booking.email);
    receipt.field(116.0, "Phone:", opt(&booking.phone));

    receipt.heading(131.0, "Package Details");
    receipt.field(139.0, "Package:", &booking.package_name);
    let route = format!(
        "{} -> {}",
        booking.origin.as_deref().unwrap_or(""),
        booking.destination.as_deref().unwrap_or("")
    );
    receipt.field(146.0, "Route:", &route);
    receipt.field(153.0, "Airline:", &booking.airline);
    receipt.field(160.0, "Flight No:", &booking.flight_number);
    receipt.field(167.0, "Date:", &booking.flight_date.to_string());
    receipt.field(174.0, "Departure:", opt(&booking.departure_time));
    receipt.field(181.0, "Arrival:", opt(&booking.arrival_time));
    receipt.field(188.0, "Duration:", opt(&booking.duration));

    receipt.heading(203.0, "Payment Details");
    let amount = if booking.total_amount > 0.0 {
        booking.total_amount
    } else {
        booking.price
    };
    receipt.text(MARGIN_MM, 212.0, 12.0, "Total Amount:");
    receipt.strong(VALUE_X_MM, 212.0, 16.0, &rupees(amount));

    receipt.text(
        MARGIN_MM,
        230.0,
        10.0,
        "Thank you for booking with Roam Travel. This is an e-confirmation. Please carry a valid ID.",
    );

    receipt.finish()
}

pub fn deal_receipt(booking: &DealBookingDetails) -> Vec<u8> {
    let mut receipt = Receipt::new();
    receipt.brand("Roam Travel", "Last-Minute Deal Ticket");

    receipt.heading(50.0, "Booking Summary");
    receipt.field(58.0, "Booking ID:", &booking.booking_id.to_string());
    let booked = booking
        .booking_date
        .map(|t| t.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_default();
    receipt.field(65.0, "Booking Date:", &booked);
    receipt.field(72.0, "Payment Method:", &booking.payment_method);
    receipt.field(79.0, "Payment Status:", &booking.payment_status);

    receipt.heading(94.0, "Passenger");
    receipt.field(102.0, "Name:", &booking.customer_name);
    receipt.field(109.0, "Email:", &booking.email);
    receipt.field(116.0, "Phone:", &booking.phone);
    let id_line = format!("{} - {}", booking.id_type, booking.government_id);
    receipt.field(123.0, "ID:", &id_line);

    receipt.heading(138.0, "Flight Details");
    receipt.field(146.0, "Airline:", &booking.airline);
    receipt.field(153.0, "Flight No:", opt(&booking.flight_number));
    let route = format!("{} -> {}", booking.origin, booking.destination);
    receipt.field(160.0, "Route:", &route);
    let date = booking
        .flight_date
        .unwrap_or(booking.travel_date)
        .to_string();
    receipt.field(167.0, "Date:", &date);
    receipt.field(174.0, "Departure:", opt(&booking.departure_time));
    receipt.field(181.0, "Arrival:", opt(&booking.arrival_time));
    receipt.field(188.0, "Duration:", opt(&booking.duration));

    receipt.heading(203.0, "Fare Summary");
    receipt.field(211.0, "Base Fare:", &rupees(booking.base_price));
    let discount_amount = (booking.base_price * booking.discount_percent / 100.0).round();
    let discount_line = format!(
        "{} - {}%: -{}",
        booking.discount_name,
        booking.discount_percent,
        rupees(discount_amount)
    );
    receipt.field(218.0, "Discount:", &discount_line);
    receipt.text(MARGIN_MM, 227.0, 12.0, "Total:");
    receipt.strong(VALUE_X_MM, 227.0, 16.0, &rupees(booking.total_amount));

    receipt.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_ticket() -> Ticket {
        Ticket {
            ticket_id: 7,
            pnr_no: "PNR1234".into(),
            flight_no: Some("6E101".into()),
            passenger_name: Some("Asha Rao".into()),
            class_type: Some("Economy".into()),
            seat_no: Some("12A".into()),
            date: NaiveDate::from_ymd_opt(2025, 4, 10),
            source: Some("Delhi".into()),
            destination: Some("Goa".into()),
            departure_time: Some("06:00".into()),
            arrival_time: Some("08:30".into()),
            fare: Some(4999.0),
            payment_mode: Some("UPI".into()),
            transaction_id: Some("TXN1700000000000".into()),
            amount: Some(4999.0),
            booking_time: NaiveDate::from_ymd_opt(2025, 4, 1).and_then(|d| d.and_hms_opt(10, 30, 0)),
        }
    }

    #[test]
    fn ticket_receipt_is_a_pdf() {
        let bytes = ticket_receipt(&sample_ticket());
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn ticket_receipt_embeds_the_pnr() {
        let bytes = ticket_receipt(&sample_ticket());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("PNR1234"));
        assert!(text.contains("Rs. 4,999"));
    }

    #[test]
    fn ticket_receipt_tolerates_missing_fields() {
        let mut ticket = sample_ticket();
        ticket.passenger_name = None;
        ticket.date = None;
        ticket.fare = None;
        ticket.booking_time = None;
        let bytes = ticket_receipt(&ticket);
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn package_receipt_is_a_pdf() {
        let booking = PackageBookingDetails {
            booking_id: 3,
            travel_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            total_amount: 9999.0,
            payment_mode: "UPI".into(),
            transaction_id: None,
            booking_time: None,
            customer_id: 1,
            customer_name: "Asha Rao".into(),
            email: "a@x.com".into(),
            phone: Some("98".into()),
            package_id: 2,
            package_name: "Goa Trip".into(),
            description: None,
            origin: Some("Delhi".into()),
            destination: Some("Goa".into()),
            flight_number: "6E1".into(),
            airline: "IndiGo".into(),
            flight_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            departure_time: Some("06:00".into()),
            arrival_time: Some("08:30".into()),
            duration: Some("2h 30m".into()),
            stay_details: None,
            price: 9999.0,
            image_url: None,
        };
        let bytes = package_receipt(&booking);
        assert!(bytes.starts_with(b"%PDF"));
        assert!(String::from_utf8_lossy(&bytes).contains("Goa Trip"));
    }

    #[test]
    fn deal_receipt_is_a_pdf() {
        let booking = DealBookingDetails {
            booking_id: 11,
            deal_id: 4,
            customer_name: "Asha Rao".into(),
            email: "a@x.com".into(),
            phone: "98".into(),
            id_type: "Aadhaar".into(),
            government_id: "1234".into(),
            age: Some(30),
            travel_date: NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
            total_amount: 7500.0,
            payment_method: "UPI".into(),
            payment_status: "Completed".into(),
            booking_date: None,
            airline: "IndiGo".into(),
            flight_number: None,
            origin: "Delhi".into(),
            destination: "Goa".into(),
            flight_date: None,
            departure_time: None,
            arrival_time: None,
            duration: None,
            base_price: 10000.0,
            discount_name: "Flash25".into(),
            discount_percent: 25.0,
        };
        let bytes = deal_receipt(&booking);
        assert!(bytes.starts_with(b"%PDF"));
        assert!(String::from_utf8_lossy(&bytes).contains("Flash25"));
    }
}

use roam_store::{
    DealRepo, FlightRepo, HotelRepo, PackageRepo, ReportingRepo, ReviewRepo, SchemaPools,
    SchemaProfile, TicketRepo, TripRepo, UserRepo,
};

/// One repository per schema, plus the optional-column profile detected at
/// startup. Everything is pool-backed and cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepo,
    pub flights: FlightRepo,
    pub hotels: HotelRepo,
    pub packages: PackageRepo,
    pub reviews: ReviewRepo,
    pub deals: DealRepo,
    pub tickets: TicketRepo,
    pub trips: TripRepo,
    pub reports: ReportingRepo,
    pub profile: SchemaProfile,
}

impl AppState {
    pub fn new(pools: SchemaPools, profile: SchemaProfile) -> Self {
        Self {
            users: UserRepo::new(pools.users.clone()),
            flights: FlightRepo::new(pools.flights.clone()),
            hotels: HotelRepo::new(pools.hotels.clone()),
            packages: PackageRepo::new(pools.packages.clone()),
            reviews: ReviewRepo::new(pools.packages.clone()),
            deals: DealRepo::new(pools.deals.clone()),
            tickets: TicketRepo::new(pools.bookings.clone()),
            trips: TripRepo::new(
                pools.bookings.clone(),
                pools.flights.clone(),
                pools.hotels.clone(),
            ),
            reports: ReportingRepo::new(pools),
            profile,
        }
    }
}

//! Built-in United States reference data.

/// State names and USPS two-letter codes: the 50 states, the District of
/// Columbia and Puerto Rico.
#[rustfmt::skip]
pub const STATES: &[&str] = &[
    "Alabama", "AL",
    "Alaska", "AK",
    "Arizona", "AZ",
    "Arkansas", "AR",
    "California", "CA",
    "Colorado", "CO",
    "Connecticut", "CT",
    "Delaware", "DE",
    "District of Columbia", "DC",
    "Florida", "FL",
    "Georgia", "GA",
    "Hawaii", "HI",
    "Idaho", "ID",
    "Illinois", "IL",
    "Indiana", "IN",
    "Iowa", "IA",
    "Kansas", "KS",
    "Kentucky", "KY",
    "Louisiana", "LA",
    "Maine", "ME",
    "Maryland", "MD",
    "Massachusetts", "MA",
    "Michigan", "MI",
    "Minnesota", "MN",
    "Mississippi", "MS",
    "Missouri", "MO",
    "Montana", "MT",
    "Nebraska", "NE",
    "Nevada", "NV",
    "New Hampshire", "NH",
    "New Jersey", "NJ",
    "New Mexico", "NM",
    "New York", "NY",
    "North Carolina", "NC",
    "North Dakota", "ND",
    "Ohio", "OH",
    "Oklahoma", "OK",
    "Oregon", "OR",
    "Pennsylvania", "PA",
    "Puerto Rico", "PR",
    "Rhode Island", "RI",
    "South Carolina", "SC",
    "South Dakota", "SD",
    "Tennessee", "TN",
    "Texas", "TX",
    "Utah", "UT",
    "Vermont", "VT",
    "Virginia", "VA",
    "Washington", "WA",
    "West Virginia", "WV",
    "Wisconsin", "WI",
    "Wyoming", "WY",
];

/// Street suffixes after USPS Publication 28 (appendix C1): primary names
/// and their standard abbreviations. Two-letter abbreviations that collide
/// with common English words ("Is", "Un") are left out.
#[rustfmt::skip]
pub const STREET_SUFFIXES: &[&str] = &[
    "Alley", "Aly",
    "Annex", "Anx",
    "Arcade",
    "Avenue", "Ave", "Av",
    "Bayou", "Byu",
    "Beach", "Bch",
    "Bend", "Bnd",
    "Bluff", "Blf",
    "Bottom", "Btm",
    "Boulevard", "Blvd",
    "Branch",
    "Bridge", "Brg",
    "Brook", "Brk",
    "Bypass", "Byp",
    "Canyon", "Cyn",
    "Cape", "Cpe",
    "Causeway", "Cswy",
    "Center", "Ctr",
    "Circle", "Cir",
    "Cliff", "Clf",
    "Club", "Clb",
    "Common", "Cmn",
    "Corner", "Cor",
    "Course", "Crse",
    "Court", "Ct",
    "Cove", "Cv",
    "Creek", "Crk",
    "Crescent", "Cres",
    "Crossing", "Xing",
    "Drive", "Dr",
    "Estate", "Est",
    "Expressway", "Expy",
    "Extension", "Ext",
    "Falls", "Fls",
    "Ferry", "Fry",
    "Field", "Fld",
    "Flat", "Flt",
    "Ford", "Frd",
    "Forest", "Frst",
    "Fork", "Frk",
    "Fort", "Ft",
    "Freeway", "Fwy",
    "Garden", "Gdn",
    "Gateway", "Gtwy",
    "Glen", "Gln",
    "Green", "Grn",
    "Grove", "Grv",
    "Harbor", "Hbr",
    "Haven", "Hvn",
    "Heights", "Hts",
    "Highway", "Hwy",
    "Hill", "Hl",
    "Hollow", "Holw",
    "Island",
    "Junction", "Jct",
    "Knoll", "Knl",
    "Lake", "Lk",
    "Landing", "Lndg",
    "Lane", "Ln",
    "Loop",
    "Mall",
    "Manor", "Mnr",
    "Meadow", "Mdw",
    "Mill", "Ml",
    "Motorway", "Mtwy",
    "Mount", "Mt",
    "Mountain", "Mtn",
    "Park",
    "Parkway", "Pkwy",
    "Pass",
    "Path",
    "Pike",
    "Place", "Pl",
    "Plaza", "Plz",
    "Point", "Pt",
    "Port", "Prt",
    "Prairie",
    "Ranch", "Rnch",
    "Ridge", "Rdg",
    "River", "Riv",
    "Road", "Rd",
    "Route", "Rte",
    "Row",
    "Run",
    "Shore", "Shr",
    "Square", "Sq",
    "Station", "Sta",
    "Street", "St",
    "Summit", "Smt",
    "Terrace", "Ter",
    "Trace", "Trce",
    "Trail", "Trl",
    "Tunnel", "Tunl",
    "Turnpike", "Tpke",
    "Valley", "Vly",
    "Via",
    "View", "Vw",
    "Village", "Vlg",
    "Vista", "Vis",
    "Walk",
    "Way",
    "Wells", "Wls",
];

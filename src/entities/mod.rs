pub mod attendance;
pub mod attendee;
pub mod award;
pub mod city;
pub mod jury;
pub mod jury_participation;
pub mod movie;
pub mod projection;
pub mod screening;
pub mod venue;

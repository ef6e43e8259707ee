/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::{collections::HashMap, fmt};
use chrono::{DateTime, Utc};
use uom::si::{f64::{Length, Velocity}, length::foot, velocity::{foot_per_minute, knot}};

use crate::msg::{AircraftStatus, SbsMessage, TransmissionData};

/// the last known state of an aircraft
#[derive(Debug,Clone)]
pub struct Aircraft {
    pub hex_id: String,
    pub aircraft_id: i32,
    pub flight_id: i32,
    pub callsign: Option<String>,

    pub altitude: Option<Length>,
    pub ground_speed: Option<Velocity>,
    pub vertical_rate: Option<Velocity>,
    pub track: Option<f64>, // [deg]
    pub latitude: Option<f64>, // [deg]
    pub longitude: Option<f64>, // [deg]
    pub squawk: Option<i32>,

    pub alert: bool,
    pub emergency: bool,
    pub spi: bool,
    pub on_ground: bool,

    pub last_update: Option<DateTime<Utc>>,
}

impl Aircraft {
    fn new (msg: &SbsMessage)->Self {
        let header = msg.header();
        Aircraft {
            hex_id: header.hex_id.clone(),
            aircraft_id: header.aircraft_id,
            flight_id: header.flight_id,
            callsign: None,
            altitude: None,
            ground_speed: None,
            vertical_rate: None,
            track: None,
            latitude: None,
            longitude: None,
            squawk: None,
            alert: false,
            emergency: false,
            spi: false,
            on_ground: false,
            last_update: header.generated_at,
        }
    }

    // only fields that are present in the message overwrite what we have
    fn load (&mut self, data: &TransmissionData) {
        if let Some(cs) = &data.callsign { self.callsign = Some(cs.clone()) }
        if let Some(alt) = data.altitude { self.altitude = Some( Length::new::<foot>(alt)) }
        if let Some(spd) = data.ground_speed { self.ground_speed = Some( Velocity::new::<knot>(spd)) }
        if let Some(vr) = data.vertical_rate { self.vertical_rate = Some( Velocity::new::<foot_per_minute>(vr)) }
        if let Some(trk) = data.ground_track { self.track = Some(trk) }
        if let Some(lat) = data.latitude { self.latitude = Some(lat) }
        if let Some(lon) = data.longitude { self.longitude = Some(lon) }
        if let Some(sq) = data.squawk { self.squawk = Some(sq) }
        if let Some(b) = data.alert { self.alert = b }
        if let Some(b) = data.emergency { self.emergency = b }
        if let Some(b) = data.spi { self.spi = b }
        if let Some(b) = data.is_on_ground { self.on_ground = b }
    }

    /// (lat,lon) once both have been reported, possibly by different messages
    pub fn position (&self)->Option<(f64,f64)> {
        Some( (self.latitude?, self.longitude?) )
    }

    fn touch (&mut self, date: Option<DateTime<Utc>>) {
        if date.is_some() { self.last_update = date }
    }
}

impl fmt::Display for Aircraft {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!( f, "Aircraft( hex: {}", self.hex_id)?;
        if let Some(cs) = &self.callsign { write!( f, ", cs: \"{cs}\"")?; }
        if let Some((lat,lon)) = self.position() { write!( f, ", pos: ({lat:.5},{lon:.5})")?; }
        if let Some(alt) = self.altitude { write!( f, ", alt: {:.0}", alt.get::<foot>())?; }
        if let Some(gs) = self.ground_speed { write!( f, ", spd: {:.1}", gs.get::<knot>())?; }
        if let Some(vr) = self.vertical_rate { write!( f, ", vr: {:.0}", vr.get::<foot_per_minute>())?; }
        if let Some(trk) = self.track { write!( f, ", trk: {trk:.0}")?; }
        if let Some(sq) = self.squawk { write!( f, ", squawk: {sq:04}")?; }
        if self.emergency { write!( f, ", EMERGENCY")?; }
        if self.on_ground { write!( f, ", gnd")?; }
        if let Some(date) = self.last_update { write!( f, ", time: {}", date.format("%H:%M:%S%.3f"))?; }
        write!( f, ")")
    }
}

/// live view of all aircraft that are currently known to the receiver
#[derive(Debug,Default)]
pub struct AircraftTable {
    aircraft: HashMap<String,Aircraft>,
}

impl AircraftTable {
    pub fn new()->Self { AircraftTable { aircraft: HashMap::new() } }

    pub fn update (&mut self, msg: &SbsMessage) {
        let hex_id = msg.hex_id();
        if hex_id.is_empty() { return }
        let date = msg.generated_at();

        match msg {
            SbsMessage::NewAircraft{..} => {
                self.get_or_create( msg).touch( date);
            }
            SbsMessage::NewId{callsign,..} => {
                let ac = self.get_or_create( msg);
                ac.callsign = Some(callsign.clone());
                ac.touch( date);
            }
            SbsMessage::SelectionChange{callsign,..} => {
                if let Some(ac) = self.aircraft.get_mut( hex_id) {
                    ac.callsign = Some(callsign.clone());
                    ac.touch( date);
                }
            }
            SbsMessage::StatusChange{status,..} => {
                if status.is_terminal() {
                    self.aircraft.remove( hex_id);
                } else {
                    self.get_or_create( msg).touch( date);
                }
            }
            SbsMessage::Transmission{data,..} => {
                let ac = self.get_or_create( msg);
                ac.load( data);
                ac.touch( date);
            }
            SbsMessage::Click{..} => {}
        }
    }

    fn get_or_create (&mut self, msg: &SbsMessage)->&mut Aircraft {
        self.aircraft.entry( msg.hex_id().to_string()).or_insert_with( || Aircraft::new( msg))
    }

    pub fn get (&self, hex_id: &str)->Option<&Aircraft> { self.aircraft.get( hex_id) }

    pub fn len (&self)->usize { self.aircraft.len() }

    pub fn is_empty (&self)->bool { self.aircraft.is_empty() }

    pub fn iter (&self)->impl Iterator<Item=&Aircraft> { self.aircraft.values() }

    /// aircraft ordered by hex id
    pub fn sorted (&self)->Vec<&Aircraft> {
        let mut list: Vec<&Aircraft> = self.aircraft.values().collect();
        list.sort_by( |a,b| a.hex_id.cmp( &b.hex_id));
        list
    }
}
